//! Reduction of an update to the cheapest remote call shape.

use crate::error::EditorResult;
use crate::guid::GuidGenerator;
use serde_json::{json, Map, Value};
use wbkit_datamodel::Statement;
use wbkit_updates::{AliasesUpdate, EntityUpdate, StatementUpdate, TermOp, TermUpdate};
use wbkit_wire::encode_statement;

/// The remote call shape chosen for an update.
#[derive(Debug, Clone)]
pub enum EditCall {
    /// No remote call; the update stages no changes.
    NoOp,
    /// Single-language label change; `None` clears the label.
    SetLabel {
        /// Language code.
        language: String,
        /// New label text, or `None` to clear.
        value: Option<String>,
    },
    /// Single-language description change; `None` clears it.
    SetDescription {
        /// Language code.
        language: String,
        /// New description text, or `None` to clear.
        value: Option<String>,
    },
    /// Single-language alias change.
    SetAliases {
        /// Language code.
        language: String,
        /// Aliases to add.
        add: Vec<String>,
        /// Aliases to remove.
        remove: Vec<String>,
    },
    /// One statement written; drafts carry a freshly generated id.
    SetClaim {
        /// The statement to write, id materialized.
        statement: Statement,
    },
    /// One or more statements removed by id.
    RemoveClaims {
        /// The statement ids, in staged order.
        ids: Vec<String>,
    },
    /// Full entity edit with a patch of the changed sections.
    EditEntity {
        /// The patch document.
        data: Value,
        /// Whether to clear the entity before applying the patch.
        clear: bool,
    },
}

/// Chooses the cheapest call shape for an update.
///
/// Precedence: no-op, single term, single-language aliases, single
/// claim, claim removals, then a full entity edit. A clear-and-replace
/// request or a create-new update (no base revision) always takes the
/// full edit path.
pub fn reduce(
    update: &EntityUpdate,
    clear: bool,
    guids: &dyn GuidGenerator,
) -> EditorResult<EditCall> {
    if update.is_empty() && !clear {
        return Ok(EditCall::NoOp);
    }
    if clear || update.base_revision().is_none() {
        return edit_entity(update, clear);
    }

    // Term sections that have no single-field call of their own force
    // the full edit path when nonempty.
    let (labels, descriptions, aliases, stray_terms) = match update {
        EntityUpdate::Item(u) => (Some(u.labels()), Some(u.descriptions()), Some(u.aliases()), false),
        EntityUpdate::Property(u) => {
            (Some(u.labels()), Some(u.descriptions()), Some(u.aliases()), false)
        }
        EntityUpdate::MediaInfo(u) => (Some(u.labels()), None, None, false),
        EntityUpdate::Lexeme(u) => (None, None, None, !u.lemmas().is_empty()),
        EntityUpdate::Form(u) => (None, None, None, !u.representations().is_empty()),
        EntityUpdate::Sense(u) => (None, None, None, !u.glosses().is_empty()),
    };
    let statements = update.statements();
    let label_ops = labels.map_or(0, TermUpdate::len);
    let description_ops = descriptions.map_or(0, TermUpdate::len);
    let alias_langs = aliases.map_or(0, |a| a.changes().len());

    if stray_terms {
        return edit_entity(update, clear);
    }

    if label_ops == 1 && description_ops == 0 && alias_langs == 0 && statements.is_empty() {
        let (language, value) = single_term(labels);
        return Ok(EditCall::SetLabel { language, value });
    }
    if description_ops == 1 && label_ops == 0 && alias_langs == 0 && statements.is_empty() {
        let (language, value) = single_term(descriptions);
        return Ok(EditCall::SetDescription { language, value });
    }
    if alias_langs == 1 && label_ops == 0 && description_ops == 0 && statements.is_empty() {
        if let Some(change) = aliases.and_then(|a| a.changes().first()) {
            return Ok(EditCall::SetAliases {
                language: change.language().to_owned(),
                add: change.added().to_vec(),
                remove: change.removed().to_vec(),
            });
        }
    }

    if label_ops == 0 && description_ops == 0 && alias_langs == 0 {
        let lone_add = statements.added().len() == 1
            && statements.replaced().is_empty()
            && statements.removed().is_empty();
        if lone_add {
            if let Some(subject_id) = update.base_id().id() {
                let statement = statements.added()[0]
                    .clone()
                    .with_id(guids.fresh_guid(subject_id));
                return Ok(EditCall::SetClaim { statement });
            }
        }
        let lone_replace = statements.replaced().len() == 1
            && statements.added().is_empty()
            && statements.removed().is_empty();
        if lone_replace {
            return Ok(EditCall::SetClaim {
                statement: statements.replaced()[0].clone(),
            });
        }
        if !statements.removed().is_empty()
            && statements.added().is_empty()
            && statements.replaced().is_empty()
        {
            return Ok(EditCall::RemoveClaims {
                ids: statements.removed().to_vec(),
            });
        }
    }

    edit_entity(update, clear)
}

fn single_term(section: Option<&TermUpdate>) -> (String, Option<String>) {
    match section.map(TermUpdate::ops).and_then(<[TermOp]>::first) {
        Some(TermOp::Put(term)) => (term.language().to_owned(), Some(term.text().to_owned())),
        Some(TermOp::Remove(language)) => (language.clone(), None),
        None => (String::new(), None),
    }
}

fn edit_entity(update: &EntityUpdate, clear: bool) -> EditorResult<EditCall> {
    let mut data = Map::new();
    match update {
        EntityUpdate::Item(u) => {
            insert_term_patch(&mut data, "labels", u.labels());
            insert_term_patch(&mut data, "descriptions", u.descriptions());
            insert_alias_patch(&mut data, u.aliases());
            insert_claims_patch(&mut data, u.statements())?;
        }
        EntityUpdate::Property(u) => {
            insert_term_patch(&mut data, "labels", u.labels());
            insert_term_patch(&mut data, "descriptions", u.descriptions());
            insert_alias_patch(&mut data, u.aliases());
            insert_claims_patch(&mut data, u.statements())?;
        }
        EntityUpdate::Lexeme(u) => {
            insert_term_patch(&mut data, "lemmas", u.lemmas());
            insert_claims_patch(&mut data, u.statements())?;
        }
        EntityUpdate::Form(u) => {
            insert_term_patch(&mut data, "representations", u.representations());
            insert_claims_patch(&mut data, u.statements())?;
        }
        EntityUpdate::Sense(u) => {
            insert_term_patch(&mut data, "glosses", u.glosses());
            insert_claims_patch(&mut data, u.statements())?;
        }
        EntityUpdate::MediaInfo(u) => {
            insert_term_patch(&mut data, "labels", u.labels());
            insert_claims_patch(&mut data, u.statements())?;
        }
    }
    Ok(EditCall::EditEntity {
        data: Value::Object(data),
        clear,
    })
}

fn insert_term_patch(data: &mut Map<String, Value>, key: &str, section: &TermUpdate) {
    if section.is_empty() {
        return;
    }
    let mut patch = Map::new();
    for op in section.ops() {
        let entry = match op {
            TermOp::Put(term) => json!({ "language": term.language(), "value": term.text() }),
            TermOp::Remove(language) => json!({ "language": language, "remove": "" }),
        };
        patch.insert(op.language().to_owned(), entry);
    }
    data.insert(key.to_owned(), Value::Object(patch));
}

fn insert_alias_patch(data: &mut Map<String, Value>, section: &AliasesUpdate) {
    if section.is_empty() {
        return;
    }
    let mut patch = Map::new();
    for change in section.changes() {
        let mut entries = Vec::new();
        for alias in change.added() {
            entries.push(json!({ "language": change.language(), "value": alias }));
        }
        for alias in change.removed() {
            entries.push(json!({ "language": change.language(), "value": alias, "remove": "" }));
        }
        patch.insert(change.language().to_owned(), Value::Array(entries));
    }
    data.insert("aliases".to_owned(), Value::Object(patch));
}

fn insert_claims_patch(
    data: &mut Map<String, Value>,
    section: &StatementUpdate,
) -> EditorResult<()> {
    if section.is_empty() {
        return Ok(());
    }
    let mut entries = Vec::new();
    for statement in section.added().iter().chain(section.replaced()) {
        entries.push(encode_statement(statement)?);
    }
    for id in section.removed() {
        entries.push(json!({ "id": id, "remove": "" }));
    }
    data.insert("claims".to_owned(), Value::Array(entries));
    Ok(())
}
