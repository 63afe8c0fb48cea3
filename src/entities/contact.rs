//! Contact threads between customers and vendors

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Entity;
use crate::error::ClientError;
use crate::gateway::{Operation, Shape};
use crate::models::{CustomerRef, VehicleRef, VendorRef, YesNo};
use crate::repository::{FieldMutation, OperationSet, Repository};
use crate::store::{EntitySlices, Store};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactMessage {
    /// `customer` or `vendor`
    pub sender: String,
    pub body: String,
    pub sent_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactThread {
    pub id: String,
    pub subject: String,
    pub customer: CustomerRef,
    pub vendor: VendorRef,
    pub vehicle: VehicleRef,
    pub messages: Vec<ContactMessage>,
    pub status: String,
    pub read: YesNo,
    pub updated_at: String,
}

impl ContactThread {
    pub fn last_message(&self) -> Option<&ContactMessage> {
        self.messages.last()
    }
}

/// Input for `replyContact`, the thread's whole-record update
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactReply {
    pub id: String,
    pub sender: String,
    #[validate(length(min = 1, max = 2000))]
    pub body: String,
}

const FIELDS: &[FieldMutation] = &[
    FieldMutation::patch(
        "status",
        Operation::sealed_mutation("editContactStatus", Shape::Entity),
    ),
    FieldMutation::patch(
        "read",
        Operation::sealed_mutation("editContactRead", Shape::Entity),
    ),
];

impl Entity for ContactThread {
    const NAME: &'static str = "ContactThread";

    const SELECTION: &'static str = "id subject \
        customer { id firstName lastName email } \
        vendor { id name logo phone organization { id name } } \
        vehicle { id brand model year price thumbnail } \
        messages { sender body sentAt } status read updatedAt";

    const OPERATIONS: OperationSet = OperationSet {
        by_id: Some(Operation::sealed_query("contactById", Shape::Entity)),
        page: Some(Operation::sealed_query("contacts", Shape::Connection)),
        filtered: Some(Operation::sealed_query("filterContacts", Shape::Connection)),
        create: Some(Operation::sealed_mutation("createContact", Shape::Entity)),
        update: Some(Operation::sealed_mutation("replyContact", Shape::Entity)),
        remove: Some(Operation::sealed_mutation("deleteContact", Shape::Ack)),
        fields: FIELDS,
    };

    fn id(&self) -> &str {
        &self.id
    }

    fn slices(store: &Store) -> &EntitySlices<Self> {
        &store.contacts
    }
}

impl Repository<ContactThread> {
    /// Post a reply to a thread. Replies are validated before anything is
    /// sent; the thread comes back whole.
    pub async fn reply(&self, reply: &ContactReply) -> Result<ContactThread, ClientError> {
        reply.validate()?;
        self.update_whole(reply).await
    }
}
