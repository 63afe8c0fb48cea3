//! Generic entity repository
//!
//! Every entity type gets the same CRUD-shaped operations. Each one seals or
//! spreads its variables, calls the gateway, unwraps the result field named
//! after the operation and settles the owning slice: idle -> pending -> idle,
//! whatever the outcome.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::codec::{IntoVariables, PayloadCodec, Plain, Sealed};
use crate::entities::Entity;
use crate::error::ClientError;
use crate::gateway::{take_result, Gateway, GatewayRequest, Operation, Transport};
use crate::models::{Connection, PageArgs, PageQuery};
use crate::store::{EntitySlices, SliceCell, SliceUpdate, Store};

mod operations;

pub use operations::{ApplyMode, FieldMutation, OperationSet};

pub struct Repository<E: Entity> {
    gateway: Arc<dyn Gateway>,
    codec: Arc<dyn PayloadCodec>,
    store: Arc<Store>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            codec: self.codec.clone(),
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(gateway: Arc<dyn Gateway>, codec: Arc<dyn PayloadCodec>, store: Arc<Store>) -> Self {
        Self {
            gateway,
            codec,
            store,
            _entity: PhantomData,
        }
    }

    /// The slices this repository writes to
    pub fn slices(&self) -> &EntitySlices<E> {
        E::slices(&self.store)
    }

    /// Fetch one entity, replacing the singular slice.
    ///
    /// The id is passed through as given; an empty id is the server's problem.
    pub async fn fetch_by_id(&self, id: &str) -> Result<E, ClientError> {
        let op = self.require(E::OPERATIONS.by_id, "fetch_by_id")?;
        {
            let mut slice = self.slices().one.write().await;
            slice.reset();
            slice.begin();
        }

        tracing::debug!(entity = E::NAME, operation = op.name, id, "Fetching entity");
        let outcome = match self.call(&op, json!({ "id": id }), None).await {
            Ok(value) => decode_entity::<E>(op.name, value),
            Err(err) => Err(err),
        };

        self.settle(&self.slices().one, &op, outcome, |entity| {
            SliceUpdate::FullReplace(entity.clone())
        })
        .await
    }

    /// Fetch one page of the collection
    pub async fn fetch_page<F: Serialize>(
        &self,
        query: &PageQuery<F>,
    ) -> Result<Connection<E>, ClientError> {
        let op = self.require(E::OPERATIONS.page, "fetch_page")?;
        self.fetch_collection(op, &query.filter, &query.page).await
    }

    /// Fetch the collection matching a filter. The collection slice is
    /// replaced even when nothing matches.
    pub async fn fetch_filtered<F: Serialize>(
        &self,
        query: &PageQuery<F>,
    ) -> Result<Connection<E>, ClientError> {
        let op = self.require(E::OPERATIONS.filtered, "fetch_filtered")?;
        self.fetch_collection(op, &query.filter, &query.page).await
    }

    /// Create an entity. Only the singular slice is written; collections must
    /// be refetched to show it.
    pub async fn create<I: Serialize>(&self, input: &I) -> Result<E, ClientError> {
        let op = self.require(E::OPERATIONS.create, "create")?;
        self.mutate_whole(op, input).await
    }

    /// Broad edit: the whole entity is reset and replaced by the response
    pub async fn update_whole<I: Serialize>(&self, input: &I) -> Result<E, ClientError> {
        let op = self.require(E::OPERATIONS.update, "update_whole")?;
        self.mutate_whole(op, input).await
    }

    /// Set one field server-side to an absolute value.
    ///
    /// Returns the singular entity as it stands after the update.
    pub async fn update_field(
        &self,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<E, ClientError> {
        let mutation = *E::OPERATIONS
            .field(field)
            .ok_or_else(|| ClientError::Unsupported {
                entity: E::NAME,
                operation: format!("update_field({})", field),
            })?;
        let op = mutation.operation;

        self.slices().one.write().await.begin();

        let mut variables = serde_json::Map::new();
        variables.insert("id".to_string(), Value::from(id));
        variables.insert(mutation.field.to_string(), value);

        tracing::debug!(
            entity = E::NAME,
            operation = op.name,
            id,
            field = mutation.field,
            "Updating field"
        );
        let outcome = match self.call(&op, Value::Object(variables), None).await {
            Ok(value) => decode_entity::<E>(op.name, value),
            Err(err) => Err(err),
        };

        let cell = &self.slices().one;
        self.settle(cell, &op, outcome, |entity| match mutation.apply {
            ApplyMode::Patch => SliceUpdate::FieldPatch {
                field: mutation.field.to_string(),
                value: field_value(entity, mutation.field),
            },
            ApplyMode::Replace => SliceUpdate::FullReplace(entity.clone()),
        })
        .await?;

        Ok(cell.read().await.data.clone())
    }

    /// Delete an entity. Client state is not touched: the deleted item stays in
    /// any slice holding it until the next refetch.
    pub async fn remove(&self, id: &str) -> Result<(), ClientError> {
        let op = self.require(E::OPERATIONS.remove, "remove")?;
        self.slices().one.write().await.begin();

        let outcome = self.call(&op, json!({ "id": id }), None).await.map(|ack| {
            tracing::info!(
                entity = E::NAME,
                operation = op.name,
                id,
                acknowledged = %ack,
                "Delete acknowledged"
            );
        });

        self.settle(&self.slices().one, &op, outcome, |_| SliceUpdate::Keep)
            .await
    }

    async fn fetch_collection<F: Serialize>(
        &self,
        op: Operation,
        filter: &F,
        page: &PageArgs,
    ) -> Result<Connection<E>, ClientError> {
        self.slices().list.write().await.begin();

        tracing::debug!(entity = E::NAME, operation = op.name, "Fetching collection");
        let outcome = match serde_json::to_value(filter) {
            Ok(filter) => match self.call(&op, filter, Some(page)).await {
                Ok(value) => decode_entity::<Connection<E>>(op.name, value),
                Err(err) => Err(err),
            },
            Err(err) => Err(ClientError::from(err)),
        }
        .map(|mut connection| {
            if connection.normalize(page.first) {
                tracing::warn!(
                    entity = E::NAME,
                    operation = op.name,
                    edges = connection.len(),
                    total_count = connection.total_count,
                    "Corrected inconsistent page envelope"
                );
            }
            connection
        });

        self.settle(&self.slices().list, &op, outcome, |connection| {
            SliceUpdate::FullReplace(connection.clone())
        })
        .await
    }

    async fn mutate_whole<I: Serialize>(&self, op: Operation, input: &I) -> Result<E, ClientError> {
        {
            let mut slice = self.slices().one.write().await;
            slice.begin();
        }

        tracing::debug!(entity = E::NAME, operation = op.name, "Submitting mutation");
        let outcome = match serde_json::to_value(input) {
            Ok(input) => match self.call(&op, input, None).await {
                Ok(value) => decode_entity::<E>(op.name, value),
                Err(err) => Err(err),
            },
            Err(err) => Err(ClientError::from(err)),
        };

        self.settle(&self.slices().one, &op, outcome, |entity| {
            SliceUpdate::FullReplace(entity.clone())
        })
        .await
    }

    /// Render, transmit and unwrap one operation
    async fn call(
        &self,
        op: &Operation,
        payload: Value,
        page: Option<&PageArgs>,
    ) -> Result<Value, ClientError> {
        let mut variables = match op.transport {
            Transport::Sealed => Sealed(payload).into_variables(self.codec.as_ref())?,
            Transport::Plain => Plain(payload).into_variables(self.codec.as_ref())?,
        };
        if let Some(page) = page {
            variables.extend(page.to_variables());
        }

        let request = GatewayRequest {
            operation_name: op.name,
            kind: op.kind,
            document: op.document(E::SELECTION),
            variables,
        };
        let data = self.gateway.execute(request).await?;
        take_result(data, op.name)
    }

    async fn settle<T, U>(
        &self,
        cell: &SliceCell<T>,
        op: &Operation,
        outcome: Result<U, ClientError>,
        update: impl FnOnce(&U) -> SliceUpdate<T>,
    ) -> Result<U, ClientError>
    where
        T: Default + Serialize + DeserializeOwned,
    {
        let mut slice = cell.write().await;
        match outcome {
            Ok(value) => {
                slice.fulfill(update(&value))?;
                Ok(value)
            }
            Err(err) => {
                if err.is_fatal() {
                    tracing::error!(
                        entity = E::NAME,
                        operation = op.name,
                        error = %err,
                        "Gateway unreachable"
                    );
                } else {
                    tracing::warn!(
                        entity = E::NAME,
                        operation = op.name,
                        code = err.error_code(),
                        error = %err,
                        "Operation rejected"
                    );
                }
                slice.reject(err.message());
                Err(err)
            }
        }
    }

    fn require(&self, op: Option<Operation>, name: &str) -> Result<Operation, ClientError> {
        op.ok_or_else(|| ClientError::Unsupported {
            entity: E::NAME,
            operation: name.to_string(),
        })
    }
}

/// Deserialize a result payload onto the default shape of `T`
fn decode_entity<T: DeserializeOwned>(key: &str, value: Value) -> Result<T, ClientError> {
    if value.is_null() {
        return Err(ClientError::MissingResult(key.to_string()));
    }
    serde_json::from_value(value).map_err(ClientError::from)
}

fn field_value<E: Serialize>(entity: &E, field: &str) -> Value {
    serde_json::to_value(entity)
        .ok()
        .and_then(|mut value| value.as_object_mut().and_then(|map| map.remove(field)))
        .unwrap_or(Value::Null)
}
