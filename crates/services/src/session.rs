use hoctap_core::model::{ClassId, ClassRef, SubjectSummary};

/// What the learner is currently looking at, passed explicitly between views.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    classes: Vec<ClassRef>,
    current_class: Option<ClassId>,
    current_subject: Option<SubjectSummary>,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the class list. The current class is kept when it is still
    /// listed, otherwise the first class becomes current.
    pub fn set_classes(&mut self, classes: Vec<ClassRef>) {
        let keep = self
            .current_class
            .as_ref()
            .is_some_and(|current| classes.iter().any(|class| &class.id == current));
        if !keep {
            self.current_class = classes.first().map(|class| class.id.clone());
            self.current_subject = None;
        }
        self.classes = classes;
    }

    /// Make `class_id` current. Unknown ids leave the selection unchanged and
    /// return `None`. Switching class forgets the current subject.
    pub fn select_class(&mut self, class_id: &ClassId) -> Option<&ClassRef> {
        let index = self.classes.iter().position(|class| &class.id == class_id)?;
        if self.current_class.as_ref() != Some(class_id) {
            self.current_class = Some(class_id.clone());
            self.current_subject = None;
        }
        self.classes.get(index)
    }

    pub fn select_subject(&mut self, subject: SubjectSummary) {
        self.current_subject = Some(subject);
    }

    #[must_use]
    pub fn classes(&self) -> &[ClassRef] {
        &self.classes
    }

    #[must_use]
    pub fn current_class(&self) -> Option<&ClassRef> {
        let current = self.current_class.as_ref()?;
        self.classes.iter().find(|class| &class.id == current)
    }

    #[must_use]
    pub fn current_subject(&self) -> Option<&SubjectSummary> {
        self.current_subject.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoctap_core::catalog;

    fn class(id: &str) -> ClassRef {
        ClassRef::new(ClassId::new(id), format!("Lớp {id}"))
    }

    #[test]
    fn first_class_becomes_current() {
        let mut session = SessionContext::new();
        assert!(session.current_class().is_none());
        session.set_classes(vec![class("10"), class("11")]);
        assert_eq!(session.current_class().map(|c| c.id.as_str()), Some("10"));
    }

    #[test]
    fn reload_keeps_selection_when_still_listed() {
        let mut session = SessionContext::new();
        session.set_classes(vec![class("10"), class("11")]);
        assert!(session.select_class(&ClassId::new("11")).is_some());
        session.select_subject(catalog::default_subject().to_summary());

        session.set_classes(vec![class("11"), class("12")]);
        assert_eq!(session.current_class().map(|c| c.id.as_str()), Some("11"));
        assert!(session.current_subject().is_some());

        session.set_classes(vec![class("12")]);
        assert_eq!(session.current_class().map(|c| c.id.as_str()), Some("12"));
        assert!(session.current_subject().is_none());
    }

    #[test]
    fn switching_class_forgets_subject() {
        let mut session = SessionContext::new();
        session.set_classes(vec![class("10"), class("11")]);
        session.select_subject(catalog::default_subject().to_summary());

        assert!(session.select_class(&ClassId::new("10")).is_some());
        assert!(session.current_subject().is_some());

        assert!(session.select_class(&ClassId::new("11")).is_some());
        assert!(session.current_subject().is_none());
    }

    #[test]
    fn unknown_class_is_rejected() {
        let mut session = SessionContext::new();
        session.set_classes(vec![class("10")]);
        assert!(session.select_class(&ClassId::new("99")).is_none());
        assert_eq!(session.current_class().map(|c| c.id.as_str()), Some("10"));
    }
}
