//! Free-text and material-facet filtering over a supplied catalog.

use resto_model::CatalogProduct;

/// Filter criteria for a catalog page. Both facets are optional; an empty
/// filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub text: Option<String>,
    pub material: Option<String>,
}

impl CatalogFilter {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    fn matches(&self, product: &CatalogProduct) -> bool {
        if let Some(material) = &self.material {
            let product_material = product.material.as_deref().unwrap_or("");
            if !product_material.eq_ignore_ascii_case(material) {
                return false;
            }
        }
        let Some(text) = &self.text else {
            return true;
        };
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            Some(product.name.as_str()),
            Some(product.category.as_str()),
            product.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
    }
}

/// Apply a filter, preserving catalog order.
pub fn search<'a>(
    catalog: &'a [CatalogProduct],
    filter: &CatalogFilter,
) -> Vec<&'a CatalogProduct> {
    catalog.iter().filter(|p| filter.matches(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, material: &str, description: &str) -> CatalogProduct {
        CatalogProduct {
            id: format!("p-{name}"),
            name: name.to_string(),
            category: "crown".to_string(),
            material: Some(material.to_string()),
            description: Some(description.to_string()),
        }
    }

    #[test]
    fn text_matches_name_category_and_description() {
        let catalog = vec![
            product("Zirconia Crown", "zirconia", "monolithic"),
            product("PFM Crown", "metal-ceramic", "porcelain fused to metal"),
        ];
        let hits = search(&catalog, &CatalogFilter::default().with_text("porcelain"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "PFM Crown");

        let all = search(&catalog, &CatalogFilter::default().with_text("  "));
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn material_facet_is_exact_and_case_insensitive() {
        let catalog = vec![
            product("Zirconia Crown", "Zirconia", ""),
            product("PFM Crown", "metal-ceramic", ""),
        ];
        let hits = search(&catalog, &CatalogFilter::default().with_material("zirconia"));
        assert_eq!(hits.len(), 1);
        let both = search(
            &catalog,
            &CatalogFilter::default()
                .with_text("crown")
                .with_material("metal-ceramic"),
        );
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].name, "PFM Crown");
    }
}
