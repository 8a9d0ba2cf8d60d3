use super::state::Menu;

pub enum Msg {
    /// The browser changed the editable area.
    Input,
    Undo,
    Redo,
    Format(FormatCommand),
    ToggleMenu(Menu),
    InsertVariable(String),
    ApplyTemplate(usize),
    OpenAiDialog,
    CloseAiDialog,
    PromptChanged(String),
    Generate,
    GenerationStarted(u64),
    Fragment { session: u64, content: String },
    GenerationFinished { session: u64, result: Result<(), String> },
    Send,
    SendCompleted,
}

/// Formatting actions of the toolbar, applied to the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    BulletList,
    NumberedList,
    AlignLeft,
    AlignCenter,
    AlignRight,
}

impl FormatCommand {
    /// Name of the matching `document.execCommand` command.
    pub fn command_id(self) -> &'static str {
        match self {
            FormatCommand::Bold => "bold",
            FormatCommand::Italic => "italic",
            FormatCommand::Underline => "underline",
            FormatCommand::Strikethrough => "strikeThrough",
            FormatCommand::BulletList => "insertUnorderedList",
            FormatCommand::NumberedList => "insertOrderedList",
            FormatCommand::AlignLeft => "justifyLeft",
            FormatCommand::AlignCenter => "justifyCenter",
            FormatCommand::AlignRight => "justifyRight",
        }
    }
}
