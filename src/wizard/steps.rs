//! Listing wizard steps and their forms

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::YesNo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    Basic,
    Images,
    DriveTrain,
    Optics,
    Features,
    Price,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Basic,
        Step::Images,
        Step::DriveTrain,
        Step::Optics,
        Step::Features,
        Step::Price,
    ];

    pub fn index(self) -> usize {
        match self {
            Step::Basic => 0,
            Step::Images => 1,
            Step::DriveTrain => 2,
            Step::Optics => 3,
            Step::Features => 4,
            Step::Price => 5,
        }
    }

    pub fn next(self) -> Option<Step> {
        Step::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<Step> {
        self.index().checked_sub(1).map(|i| Step::ALL[i])
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::Basic => "Basic details",
            Step::Images => "Images",
            Step::DriveTrain => "Drive train",
            Step::Optics => "Optics",
            Step::Features => "Features",
            Step::Price => "Price",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BasicDetails {
    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    #[validate(length(min = 1))]
    pub condition: String,
    #[validate(range(min = 0))]
    pub mileage: i64,
    #[validate(length(max = 5000))]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "thumbnail_is_listed"))]
pub struct ImageSet {
    #[validate(length(min = 1, message = "At least one image is required"))]
    pub image_urls: Vec<String>,
    pub thumbnail: String,
}

fn thumbnail_is_listed(images: &ImageSet) -> Result<(), ValidationError> {
    if images.thumbnail.is_empty() || images.image_urls.contains(&images.thumbnail) {
        Ok(())
    } else {
        Err(ValidationError::new("thumbnail_not_in_images"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DriveTrain {
    #[validate(length(min = 1))]
    pub transmission: String,
    #[validate(length(min = 1))]
    pub fuel_type: String,
    pub engine_size: String,
    pub drive_type: String,
    /// `left` or `right`
    #[validate(length(min = 1))]
    pub steering: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Optics {
    #[validate(length(min = 1))]
    pub body_type: String,
    #[validate(length(min = 1))]
    pub exterior_color: String,
    pub interior_color: String,
    pub upholstery: String,
    #[validate(range(min = 1, max = 60))]
    pub seats: i32,
    #[validate(range(min = 0, max = 8))]
    pub doors: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    /// May be empty
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    #[validate(range(min = 1.0, message = "Price must be positive"))]
    pub price: f64,
    #[validate(length(equal = 3))]
    pub currency: String,
    pub negotiable: YesNo,
}

/// One step's submitted form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", content = "data", rename_all = "camelCase")]
pub enum StepData {
    Basic(BasicDetails),
    Images(ImageSet),
    DriveTrain(DriveTrain),
    Optics(Optics),
    Features(Features),
    Price(Pricing),
}

impl StepData {
    pub fn step(&self) -> Step {
        match self {
            StepData::Basic(_) => Step::Basic,
            StepData::Images(_) => Step::Images,
            StepData::DriveTrain(_) => Step::DriveTrain,
            StepData::Optics(_) => Step::Optics,
            StepData::Features(_) => Step::Features,
            StepData::Price(_) => Step::Price,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            StepData::Basic(form) => form.validate(),
            StepData::Images(form) => form.validate(),
            StepData::DriveTrain(form) => form.validate(),
            StepData::Optics(form) => form.validate(),
            StepData::Features(form) => form.validate(),
            StepData::Price(form) => form.validate(),
        }
    }
}

/// The partial forms collected so far
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingParts {
    pub basic: Option<BasicDetails>,
    pub images: Option<ImageSet>,
    pub drive_train: Option<DriveTrain>,
    pub optics: Option<Optics>,
    pub features: Option<Features>,
    pub price: Option<Pricing>,
}

impl ListingParts {
    pub fn store(&mut self, data: StepData) {
        match data {
            StepData::Basic(form) => self.basic = Some(form),
            StepData::Images(form) => self.images = Some(form),
            StepData::DriveTrain(form) => self.drive_train = Some(form),
            StepData::Optics(form) => self.optics = Some(form),
            StepData::Features(form) => self.features = Some(form),
            StepData::Price(form) => self.price = Some(form),
        }
    }

    pub fn has(&self, step: Step) -> bool {
        match step {
            Step::Basic => self.basic.is_some(),
            Step::Images => self.images.is_some(),
            Step::DriveTrain => self.drive_train.is_some(),
            Step::Optics => self.optics.is_some(),
            Step::Features => self.features.is_some(),
            Step::Price => self.price.is_some(),
        }
    }
}
