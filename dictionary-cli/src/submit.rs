//! Saving the descriptions of one table

use std::sync::Arc;

use crate::api::{ApiError, DictionaryApi};
use crate::dictionary::{DescriptionEditor, EditError};
use crate::prompt::{Notice, Prompter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The user said no; nothing was sent
    Declined,
    Saved,
    /// The server rejected the update; local edits are kept for a retry
    Failed(ApiError),
}

pub struct UpdateSubmitter {
    api: Arc<dyn DictionaryApi>,
    prompter: Arc<dyn Prompter>,
}

impl UpdateSubmitter {
    pub fn new(api: Arc<dyn DictionaryApi>, prompter: Arc<dyn Prompter>) -> Self {
        Self { api, prompter }
    }

    /// Confirm with the user, then send every description of the table
    ///
    /// Local state is never cleared or rolled back, whatever the outcome.
    pub async fn submit(
        &self,
        editor: &DescriptionEditor,
        table_idx: usize,
    ) -> Result<SubmitOutcome, EditError> {
        if editor.snapshot().is_stale() {
            return Err(EditError::StaleSnapshot);
        }
        let table_name = editor
            .snapshot()
            .table(table_idx)
            .map(|t| t.name.clone())
            .ok_or(EditError::NoSuchTable { idx: table_idx })?;

        let question = format!(
            "Are you sure you want to update the dictionary of the table ({})?",
            table_name
        );
        if !self.prompter.confirm(&question) {
            log::info!("Update of table '{}' declined", table_name);
            return Ok(SubmitOutcome::Declined);
        }

        let payload = editor.payload_for(table_idx)?;
        log::info!(
            "Saving descriptions of table '{}' ({} columns)",
            table_name,
            payload.columns_data.len()
        );

        match self.api.update_dictionary(&payload).await {
            Ok(()) => {
                self.prompter.notify(Notice::Success(format!(
                    "The dictionary of the table ({}) was updated.",
                    table_name
                )));
                Ok(SubmitOutcome::Saved)
            }
            Err(err) => {
                log::error!("Update of table '{}' failed: {}", table_name, err);
                self.prompter.notify(Notice::Failure(err.user_message()));
                Ok(SubmitOutcome::Failed(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeApi;
    use crate::dictionary::assembly::assemble;
    use crate::dictionary::models::{Column, DatabaseInfo, Table};
    use crate::prompt::testing::ScriptedPrompter;
    use std::sync::atomic::Ordering;

    fn make_editor() -> DescriptionEditor {
        let tables = vec![Table {
            id: "t1".to_string(),
            name: "users".to_string(),
            description: None,
        }];
        let columns = vec![
            Column {
                id: "c1".to_string(),
                name: "email".to_string(),
                table_name: "users".to_string(),
                db_type: "TEXT".to_string(),
                ..Default::default()
            },
            Column {
                id: "c2".to_string(),
                name: "id".to_string(),
                table_name: "users".to_string(),
                db_type: "INT".to_string(),
                is_primary_key: true,
                ..Default::default()
            },
        ];
        DescriptionEditor::new(assemble(DatabaseInfo::default(), &tables, &columns))
    }

    #[tokio::test]
    async fn test_decline_sends_nothing() {
        let api = Arc::new(FakeApi::new());
        let prompter = Arc::new(ScriptedPrompter::answering(&[false]));
        let submitter = UpdateSubmitter::new(api.clone(), prompter.clone());
        let mut editor = make_editor();
        editor.set_table_description(0, "people").unwrap();
        editor.set_column_description(0, 1, "login").unwrap();

        let outcome = submitter.submit(&editor, 0).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Declined);
        assert_eq!(api.update_calls.load(Ordering::SeqCst), 0);
        assert!(prompter.questions()[0].contains("(users)"));
        assert_eq!(editor.snapshot().tables()[0].description, "people");
        assert_eq!(editor.snapshot().tables()[0].columns()[1].description, "login");
    }

    #[tokio::test]
    async fn test_confirmed_save_sends_all_columns() {
        let api = Arc::new(FakeApi::new());
        let prompter = Arc::new(ScriptedPrompter::answering(&[true]));
        let submitter = UpdateSubmitter::new(api.clone(), prompter.clone());
        let mut editor = make_editor();
        editor.set_column_description_by_id("c1", "login").unwrap();

        let outcome = submitter.submit(&editor, 0).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Saved);
        let payloads = api.payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].table_id, "t1");
        let ids: Vec<&str> = payloads[0]
            .columns_data
            .iter()
            .map(|c| c.col_id.as_str())
            .collect();
        assert_eq!(ids, vec!["c2", "c1"]);
        assert_eq!(payloads[0].columns_data[1].description, "login");
        assert!(matches!(prompter.notices()[0], Notice::Success(_)));
    }

    #[tokio::test]
    async fn test_failure_keeps_edits() {
        let api = Arc::new(FakeApi::new().update_result(Err(ApiError::Status {
            status: 500,
            body: "Internal Server Error".to_string(),
        })));
        let prompter = Arc::new(ScriptedPrompter::answering(&[true, true]));
        let submitter = UpdateSubmitter::new(api.clone(), prompter.clone());
        let mut editor = make_editor();
        editor.set_table_description(0, "people").unwrap();

        let outcome = submitter.submit(&editor, 0).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(
            prompter.notices(),
            vec![Notice::Failure("Internal Server Error".to_string())]
        );
        assert_eq!(editor.snapshot().tables()[0].description, "people");

        // A retry resends the same edits
        submitter.submit(&editor, 0).await.unwrap();
        assert_eq!(api.update_calls.load(Ordering::SeqCst), 2);
        assert_eq!(api.payloads()[1].table_description, "people");
    }

    #[tokio::test]
    async fn test_stale_or_missing_table() {
        let api = Arc::new(FakeApi::new());
        let prompter = Arc::new(ScriptedPrompter::answering(&[true]));
        let submitter = UpdateSubmitter::new(api.clone(), prompter.clone());
        let mut editor = make_editor();

        assert_eq!(
            submitter.submit(&editor, 4).await,
            Err(EditError::NoSuchTable { idx: 4 })
        );

        editor.mark_stale();
        assert_eq!(
            submitter.submit(&editor, 0).await,
            Err(EditError::StaleSnapshot)
        );
        assert!(prompter.questions().is_empty());
        assert_eq!(api.update_calls.load(Ordering::SeqCst), 0);
    }
}
