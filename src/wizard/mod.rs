//! Multi-step vehicle listing wizard
//!
//! Six forms are confirmed one at a time and merged into a single
//! `createVehicle` call on submit. With a [`DraftStore`] attached, every
//! confirmation is persisted so an interrupted wizard can be resumed.

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::entities::Vehicle;
use crate::error::ClientError;
use crate::models::YesNo;
use crate::repository::Repository;

pub mod draft;
pub mod steps;

pub use draft::{DraftRecord, DraftStore, DRAFT_VERSION};
pub use steps::{
    BasicDetails, DriveTrain, Features, ImageSet, ListingParts, Optics, Pricing, Step, StepData,
};

#[derive(Error, Debug, PartialEq)]
pub enum WizardError {
    #[error("Step '{0}' must be confirmed before moving on")]
    StepNotConfirmed(Step),

    #[error("Already at the last step")]
    AlreadyAtLastStep,

    #[error("Listing is incomplete, unconfirmed steps: {0:?}")]
    Incomplete(Vec<Step>),

    #[error("Invalid form: {0}")]
    Invalid(String),
}

/// The merged `createVehicle` input
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub entry_no: String,
    #[serde(flatten)]
    pub basic: BasicDetails,
    #[serde(flatten)]
    pub images: ImageSet,
    #[serde(flatten)]
    pub drive_train: DriveTrain,
    #[serde(flatten)]
    pub optics: Optics,
    #[serde(flatten)]
    pub features: Features,
    #[serde(flatten)]
    pub price: Pricing,
    pub views: i64,
    pub reserved: YesNo,
    pub sold: YesNo,
}

/// Entry numbers look like `MM-241017-048213`
pub fn generate_entry_no() -> String {
    let serial: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("MM-{}-{:06}", Utc::now().format("%y%m%d"), serial)
}

pub struct ListingWizard {
    id: Uuid,
    current: Step,
    confirmed: [bool; 6],
    parts: ListingParts,
    drafts: Option<DraftStore>,
}

impl Default for ListingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingWizard {
    /// A wizard that keeps its state in memory only
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            current: Step::Basic,
            confirmed: [false; 6],
            parts: ListingParts::default(),
            drafts: None,
        }
    }

    pub fn with_drafts(drafts: DraftStore) -> Self {
        Self {
            drafts: Some(drafts),
            ..Self::new()
        }
    }

    /// Restore a wizard from its persisted draft
    pub fn resume(drafts: DraftStore, id: Uuid) -> Result<Option<Self>, ClientError> {
        let record = match drafts.load(id)? {
            Some(record) => record,
            None => return Ok(None),
        };

        tracing::info!(wizard_id = %id, step = %record.current, "Resuming listing draft");
        Ok(Some(Self {
            id,
            current: record.current,
            confirmed: record.confirmed,
            parts: record.parts,
            drafts: Some(drafts),
        }))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current(&self) -> Step {
        self.current
    }

    pub fn confirmations(&self) -> [bool; 6] {
        self.confirmed
    }

    pub fn is_confirmed(&self, step: Step) -> bool {
        self.confirmed[step.index()]
    }

    pub fn parts(&self) -> &ListingParts {
        &self.parts
    }

    /// Validate and store one step's form, marking the step confirmed
    pub fn confirm(&mut self, data: StepData) -> Result<(), ClientError> {
        let step = data.step();
        data.validate()
            .map_err(|err| WizardError::Invalid(format!("{}: {}", step, err)))?;

        self.parts.store(data);
        self.confirmed[step.index()] = true;
        tracing::debug!(wizard_id = %self.id, %step, "Step confirmed");

        self.persist()
    }

    pub fn advance(&mut self) -> Result<Step, WizardError> {
        if !self.is_confirmed(self.current) {
            return Err(WizardError::StepNotConfirmed(self.current));
        }
        let next = self.current.next().ok_or(WizardError::AlreadyAtLastStep)?;
        self.current = next;
        Ok(next)
    }

    pub fn back(&mut self) -> Step {
        if let Some(previous) = self.current.previous() {
            self.current = previous;
        }
        self.current
    }

    /// Move to any step; confirmations are not rechecked
    pub fn jump_to(&mut self, step: Step) {
        self.current = step;
    }

    pub fn unconfirmed(&self) -> Vec<Step> {
        Step::ALL
            .into_iter()
            .filter(|step| !self.is_confirmed(*step) || !self.parts.has(*step))
            .collect()
    }

    pub fn build_request(&self, entry_no: impl Into<String>) -> Result<NewListing, WizardError> {
        let missing = self.unconfirmed();
        if !missing.is_empty() {
            return Err(WizardError::Incomplete(missing));
        }

        let parts = &self.parts;
        match (
            &parts.basic,
            &parts.images,
            &parts.drive_train,
            &parts.optics,
            &parts.features,
            &parts.price,
        ) {
            (
                Some(basic),
                Some(images),
                Some(drive_train),
                Some(optics),
                Some(features),
                Some(price),
            ) => Ok(NewListing {
                entry_no: entry_no.into(),
                basic: basic.clone(),
                images: images.clone(),
                drive_train: drive_train.clone(),
                optics: optics.clone(),
                features: features.clone(),
                price: price.clone(),
                views: 0,
                reserved: YesNo::No,
                sold: YesNo::No,
            }),
            _ => Err(WizardError::Incomplete(self.unconfirmed())),
        }
    }

    /// Create the vehicle in one call. The draft is deleted only when the
    /// create succeeds.
    pub async fn submit(&self, vehicles: &Repository<Vehicle>) -> Result<Vehicle, ClientError> {
        let listing = self.build_request(generate_entry_no())?;
        tracing::info!(wizard_id = %self.id, entry_no = %listing.entry_no, "Submitting listing");

        let vehicle = vehicles.create(&listing).await?;
        self.discard()?;
        Ok(vehicle)
    }

    pub fn discard(&self) -> Result<(), ClientError> {
        if let Some(drafts) = &self.drafts {
            drafts.discard(self.id)?;
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), ClientError> {
        if let Some(drafts) = &self.drafts {
            drafts.save(&DraftRecord {
                version: DRAFT_VERSION,
                wizard_id: self.id,
                current: self.current,
                confirmed: self.confirmed,
                parts: self.parts.clone(),
                updated_at: Utc::now(),
            })?;
        }
        Ok(())
    }
}
