use anyhow::Result;

use crate::validate::ValidationError;

pub type StringValidator<'a> = &'a dyn Fn(&str) -> std::result::Result<(), ValidationError>;
pub type NumberValidator<'a> = &'a dyn Fn(f64) -> std::result::Result<(), ValidationError>;

/// The modal-dialog collaborator the registry operations drive. Prompts
/// re-show themselves with the rejection message until the answer validates
/// or the user cancels; `None` always means explicit cancellation. The
/// `Err` layer carries transport failures only, never validation.
pub trait Dialog {
    fn prompt_string(
        &mut self,
        title: &str,
        label: &str,
        validate: StringValidator,
    ) -> Result<Option<String>>;

    fn prompt_number(
        &mut self,
        title: &str,
        label: &str,
        validate: NumberValidator,
    ) -> Result<Option<f64>>;

    /// Yes/no. Dismissing the dialog counts as "no".
    fn confirm(&mut self, title: &str, message: &str) -> Result<bool>;

    fn show_info(&mut self, title: &str, message: &str) -> Result<()>;

    fn show_alert(&mut self, title: &str, message: &str) -> Result<()>;

    /// Long-form display, e.g. the report block.
    fn show_text(&mut self, title: &str, message: &str) -> Result<()>;

    /// Menu dialog: the reply picks an option index; cancellation exits.
    fn choose_option(&mut self, title: &str, options: &[&str]) -> Result<Option<usize>>;
}
