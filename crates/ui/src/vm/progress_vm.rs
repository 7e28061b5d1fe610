use services::ProgressSummary;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub total_label: String,
    pub items: Vec<String>,
    pub empty_hint: Option<&'static str>,
}

#[must_use]
pub fn map_progress(summary: &ProgressSummary) -> ProgressVm {
    let items = summary
        .completed
        .iter()
        .map(|id| format!("Question #{id}"))
        .collect::<Vec<_>>();
    let empty_hint = items
        .is_empty()
        .then_some("No completed questions yet. Mark one as done from the Articles tab.");

    ProgressVm {
        total_label: summary.total.to_string(),
        items,
        empty_hint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::model::QuestionId;

    #[test]
    fn lists_completed_ids_in_order() {
        let summary = ProgressSummary {
            total: 2,
            completed: vec![QuestionId::new(3), QuestionId::new(17)],
        };
        let vm = map_progress(&summary);
        assert_eq!(vm.total_label, "2");
        assert_eq!(vm.items, vec!["Question #3", "Question #17"]);
        assert_eq!(vm.empty_hint, None);
    }

    #[test]
    fn empty_progress_shows_hint() {
        let vm = map_progress(&ProgressSummary::default());
        assert_eq!(vm.total_label, "0");
        assert!(vm.empty_hint.is_some());
    }
}
