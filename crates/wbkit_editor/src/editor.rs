//! Edit dispatch with maxlag retry, token refresh and budget control.

use crate::config::{EditOptions, EditorConfig};
use crate::error::{EditorError, EditorResult};
use crate::guid::{GuidGenerator, RandomGuidGenerator};
use crate::reduction::{reduce, EditCall};
use crate::token::TokenProvider;
use crate::transport::{ApiTransport, Params};
use parking_lot::Mutex;
use serde_json::Value;
use wbkit_datamodel::{EntityDocument, ModelError};
use wbkit_updates::EntityUpdate;
use wbkit_wire::{decode_entity_document, encode_statement};

/// Dispatches entity edits against one remote site.
///
/// One editor drives one logical edit at a time; concurrent edits
/// against the same remote entity rely on the base-revision check for
/// conflict detection.
pub struct WikibaseEditor<T, K, G = RandomGuidGenerator> {
    transport: T,
    tokens: K,
    guids: G,
    config: EditorConfig,
    // Remaining edits; negative means unlimited.
    remaining_edits: Mutex<i64>,
}

impl<T: ApiTransport, K: TokenProvider> WikibaseEditor<T, K> {
    /// Creates an editor with random statement GUID generation.
    pub fn new(transport: T, tokens: K, config: EditorConfig) -> Self {
        Self {
            transport,
            tokens,
            guids: RandomGuidGenerator,
            config,
            remaining_edits: Mutex::new(-1),
        }
    }
}

impl<T: ApiTransport, K: TokenProvider, G: GuidGenerator> WikibaseEditor<T, K, G> {
    /// Replaces the statement GUID generator.
    pub fn with_guid_generator<G2: GuidGenerator>(self, guids: G2) -> WikibaseEditor<T, K, G2> {
        WikibaseEditor {
            transport: self.transport,
            tokens: self.tokens,
            guids,
            config: self.config,
            remaining_edits: self.remaining_edits,
        }
    }

    /// Sets the number of edits this editor may still perform.
    ///
    /// A negative value disables the budget check.
    pub fn set_remaining_edits(&self, remaining: i64) {
        *self.remaining_edits.lock() = remaining;
    }

    /// Refuses all further edits.
    pub fn disable_editing(&self) {
        self.set_remaining_edits(0);
    }

    /// Returns the remaining edit budget; negative means unlimited.
    pub fn remaining_edits(&self) -> i64 {
        *self.remaining_edits.lock()
    }

    /// Applies an update on top of a base document.
    ///
    /// Returns the resulting document with the server-assigned
    /// revision, `Ok(None)` when the edit budget is exhausted, or the
    /// base document unchanged when the update stages no changes.
    /// For create-new updates the base is an empty placeholder
    /// document of the right kind.
    pub fn apply_update(
        &self,
        base: &EntityDocument,
        update: &EntityUpdate,
        options: &EditOptions,
    ) -> EditorResult<Option<EntityDocument>> {
        if base.id() != update.base_id() {
            return Err(EditorError::Model(ModelError::malformed_id(
                update.base_id().to_string(),
                "update base id does not match the base document",
            )));
        }

        let call = reduce(update, options.clear, &self.guids)?;
        if matches!(call, EditCall::NoOp) {
            return Ok(Some(base.clone()));
        }
        if self.remaining_edits() == 0 {
            tracing::debug!(id = %update.base_id(), "edit budget exhausted, refusing edit");
            return Ok(None);
        }

        let params = self.params_for(&call, update, options)?;
        let response = self.dispatch(&params)?;

        let mut budget = self.remaining_edits.lock();
        if *budget > 0 {
            *budget -= 1;
        }
        drop(budget);

        let result = self.build_result(base, &call, &response)?;
        tracing::info!(
            id = %result.id(),
            revision = result.revision_id(),
            "edit applied"
        );
        Ok(Some(result))
    }

    fn params_for(
        &self,
        call: &EditCall,
        update: &EntityUpdate,
        options: &EditOptions,
    ) -> EditorResult<Params> {
        let mut params = Params::new();
        let mut push = |key: &str, value: String| params.push((key.to_owned(), value));

        let creating = update.base_revision().is_none();
        match call {
            EditCall::NoOp => {}
            EditCall::SetLabel { language, value } => {
                push("action", "wbsetlabel".to_owned());
                push("id", update.base_id().to_string());
                push("language", language.clone());
                if let Some(value) = value {
                    push("value", value.clone());
                }
            }
            EditCall::SetDescription { language, value } => {
                push("action", "wbsetdescription".to_owned());
                push("id", update.base_id().to_string());
                push("language", language.clone());
                if let Some(value) = value {
                    push("value", value.clone());
                }
            }
            EditCall::SetAliases {
                language,
                add,
                remove,
            } => {
                push("action", "wbsetaliases".to_owned());
                push("id", update.base_id().to_string());
                push("language", language.clone());
                if !add.is_empty() {
                    push("add", add.join("|"));
                }
                if !remove.is_empty() {
                    push("remove", remove.join("|"));
                }
            }
            EditCall::SetClaim { statement } => {
                push("action", "wbsetclaim".to_owned());
                let claim = encode_statement(statement)?;
                push("claim", claim.to_string());
            }
            EditCall::RemoveClaims { ids } => {
                push("action", "wbremoveclaims".to_owned());
                push("claim", ids.join("|"));
            }
            EditCall::EditEntity { data, clear } => {
                push("action", "wbeditentity".to_owned());
                if creating {
                    push("new", update.base_id().entity_type().wire_name().to_owned());
                } else {
                    push("id", update.base_id().to_string());
                }
                push("data", data.to_string());
                if *clear {
                    push("clear", "1".to_owned());
                }
            }
        }

        if !creating {
            if let Some(revision) = update.base_revision() {
                push("baserevid", revision.to_string());
            }
        }
        if let Some(summary) = &options.summary {
            push("summary", summary.clone());
        }
        if !options.tags.is_empty() {
            push("tags", options.tags.join("|"));
        }
        if self.config.bot {
            push("bot", "1".to_owned());
        }
        push("maxlag", self.config.maxlag.to_string());
        Ok(params)
    }

    /// Runs one call to completion, retrying through the two transient
    /// server conditions: maxlag rejections with bounded backoff, and
    /// one token refresh.
    fn dispatch(&self, params: &Params) -> EditorResult<Value> {
        let mut lag_attempts: u32 = 0;
        let mut token_refreshed = false;
        loop {
            let mut attempt_params = params.clone();
            attempt_params.push(("token".to_owned(), self.tokens.token()?));
            let response = self.transport.call(&attempt_params)?;

            let Some(error) = response.get("error") else {
                return Ok(response);
            };
            let code = error
                .get("code")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_owned();
            let info = error
                .get("info")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned();

            match code.as_str() {
                "maxlag" => {
                    lag_attempts += 1;
                    if lag_attempts >= self.config.max_retries {
                        return Err(EditorError::RateLimitExceeded {
                            attempts: lag_attempts,
                        });
                    }
                    let wait = self.config.wait_for_attempt(lag_attempts);
                    tracing::warn!(
                        attempt = lag_attempts,
                        wait_ms = wait.as_millis() as u64,
                        "server lagged, backing off"
                    );
                    std::thread::sleep(wait);
                }
                "badtoken" => {
                    if token_refreshed {
                        return Err(EditorError::token(info));
                    }
                    tracing::debug!("token rejected, refreshing once");
                    self.tokens.invalidate();
                    token_refreshed = true;
                }
                "editconflict" => {
                    return Err(EditorError::EditConflict { message: info });
                }
                _ if code == "badtags" || code.starts_with("tags-") => {
                    return Err(EditorError::TagRejected { message: info });
                }
                _ => return Err(EditorError::service(code.as_str(), info)),
            }
        }
    }

    fn build_result(
        &self,
        base: &EntityDocument,
        call: &EditCall,
        response: &Value,
    ) -> EditorResult<EntityDocument> {
        if response.get("success").and_then(Value::as_u64) != Some(1) {
            return Err(EditorError::malformed_response(
                "response carries neither an error nor a success flag",
            ));
        }

        match call {
            EditCall::SetClaim { statement } => {
                let revision = page_revision(response)?;
                let mut result = base.clone();
                if let Some(id) = statement.id() {
                    result = result.without_statement_ids(&[id.to_owned()]);
                }
                Ok(result
                    .with_statement(statement.clone())
                    .with_revision_id(revision))
            }
            EditCall::RemoveClaims { ids } => {
                let revision = page_revision(response)?;
                Ok(base
                    .clone()
                    .without_statement_ids(ids)
                    .with_revision_id(revision))
            }
            _ => {
                let entity = response.get("entity").ok_or_else(|| {
                    EditorError::malformed_response("successful edit carries no \"entity\"")
                })?;
                Ok(decode_entity_document(entity, &self.config.site_iri)?)
            }
        }
    }
}

fn page_revision(response: &Value) -> EditorResult<u64> {
    response
        .get("pageinfo")
        .and_then(|info| info.get("lastrevid"))
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            EditorError::malformed_response("successful claim edit carries no \"pageinfo.lastrevid\"")
        })
}
