/// A named single-line text input in the host form
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Field {
    name: String,
    label: String,
    value: String,
    disabled: bool,
}

impl Field {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// The fields a picker reads from and writes to.  Fields are looked up by
/// name; lookups of unknown names come back empty rather than failing.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Form {
    fields: Vec<Field>,
    focus: Option<usize>,
}

impl Form {
    pub(crate) fn new() -> Form {
        Form::default()
    }

    pub(crate) fn with_field<S: Into<String>, T: Into<String>>(mut self, name: S, label: T) -> Form {
        self.fields.push(Field {
            name: name.into(),
            label: label.into(),
            value: String::new(),
            disabled: false,
        });
        self
    }

    pub(crate) fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub(crate) fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(Field::value)
    }

    /// Returns `false` if there is no such field
    pub(crate) fn set_value<S: Into<String>>(&mut self, name: &str, value: S) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Returns `false` if there is no such field
    pub(crate) fn set_disabled(&mut self, name: &str, disabled: bool) -> bool {
        let Some(i) = self.position(name) else {
            return false;
        };
        self.fields[i].disabled = disabled;
        if disabled && self.focus == Some(i) {
            self.focus = None;
        }
        true
    }

    pub(crate) fn focused(&self) -> Option<usize> {
        self.focus
    }

    /// Focuses the field at index `i` for typing.  Returns `false` if there
    /// is no such field or it is disabled.
    pub(crate) fn focus(&mut self, i: usize) -> bool {
        if self.fields.get(i).is_some_and(|f| !f.disabled) {
            self.focus = Some(i);
            true
        } else {
            false
        }
    }

    pub(crate) fn unfocus(&mut self) {
        self.focus = None;
    }

    /// Appends a character to the focused field.  Returns `false` if no
    /// field is focused.
    pub(crate) fn type_char(&mut self, ch: char) -> bool {
        match self.focused_field_mut() {
            Some(field) => {
                field.value.push(ch);
                true
            }
            None => false,
        }
    }

    /// Deletes the last character of the focused field.  Returns `false` if
    /// no field is focused or the field is already empty.
    pub(crate) fn backspace(&mut self) -> bool {
        self.focused_field_mut()
            .is_some_and(|field| field.value.pop().is_some())
    }

    fn focused_field_mut(&mut self) -> Option<&mut Field> {
        let i = self.focus?;
        self.fields.get_mut(i).filter(|f| !f.disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Form {
        Form::new()
            .with_field("start", "Start date")
            .with_field("days", "Days")
    }

    #[test]
    fn test_lookup_by_name() {
        let mut form = sample();
        assert!(form.set_value("days", "5"));
        assert_eq!(form.value("days"), Some("5"));
        assert_eq!(form.value("start"), Some(""));
        assert_eq!(form.value("end"), None);
        assert!(!form.set_value("end", "2024-03-19"));
        assert_eq!(form.position("days"), Some(1));
    }

    #[test]
    fn test_typing() {
        let mut form = sample();
        assert!(!form.type_char('x'));
        assert!(form.focus(0));
        for ch in "2024-03-1".chars() {
            assert!(form.type_char(ch));
        }
        assert!(form.backspace());
        assert!(form.type_char('5'));
        assert_eq!(form.value("start"), Some("2024-03-5"));
        form.unfocus();
        assert!(!form.backspace());
    }

    #[test]
    fn test_disabled_fields_refuse_typing() {
        let mut form = sample();
        assert!(form.focus(1));
        assert!(form.set_disabled("days", true));
        assert_eq!(form.focused(), None);
        assert!(!form.focus(1));
        assert!(!form.type_char('1'));
        assert!(form.set_value("days", "3"));
        assert_eq!(form.value("days"), Some("3"));
        assert!(form.set_disabled("days", false));
        assert!(!form.fields()[1].is_disabled());
        assert!(!form.set_disabled("end", true));
    }
}
