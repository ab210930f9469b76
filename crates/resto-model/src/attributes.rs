//! Clinical attribute fields shared by groups and individual teeth.

use serde::{Deserialize, Serialize};

/// The six promotable clinical attribute fields. Groups carry the promoted
/// values; individual teeth carry them only until promotion strips the
/// member copies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestorationAttributes {
    pub shade: Option<String>,
    pub shade_guide: Option<String>,
    pub shade_notes: Option<String>,
    pub occlusal_staining: Option<String>,
    pub trial_requirements: Option<String>,
    pub pontic_design: Option<String>,
}

/// Field selector used by the promotion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeField {
    Shade,
    ShadeGuide,
    ShadeNotes,
    OcclusalStaining,
    TrialRequirements,
    PonticDesign,
}

impl AttributeField {
    pub const ALL: [AttributeField; 6] = [
        AttributeField::Shade,
        AttributeField::ShadeGuide,
        AttributeField::ShadeNotes,
        AttributeField::OcclusalStaining,
        AttributeField::TrialRequirements,
        AttributeField::PonticDesign,
    ];
}

impl RestorationAttributes {
    pub fn get(&self, field: AttributeField) -> Option<&str> {
        let value = match field {
            AttributeField::Shade => &self.shade,
            AttributeField::ShadeGuide => &self.shade_guide,
            AttributeField::ShadeNotes => &self.shade_notes,
            AttributeField::OcclusalStaining => &self.occlusal_staining,
            AttributeField::TrialRequirements => &self.trial_requirements,
            AttributeField::PonticDesign => &self.pontic_design,
        };
        value.as_deref()
    }

    pub fn set(&mut self, field: AttributeField, value: Option<String>) {
        let slot = match field {
            AttributeField::Shade => &mut self.shade,
            AttributeField::ShadeGuide => &mut self.shade_guide,
            AttributeField::ShadeNotes => &mut self.shade_notes,
            AttributeField::OcclusalStaining => &mut self.occlusal_staining,
            AttributeField::TrialRequirements => &mut self.trial_requirements,
            AttributeField::PonticDesign => &mut self.pontic_design,
        };
        *slot = value;
    }

    pub fn clear(&mut self, field: AttributeField) {
        self.set(field, None);
    }

    pub fn is_empty(&self) -> bool {
        AttributeField::ALL.iter().all(|&f| self.get(f).is_none())
    }
}
