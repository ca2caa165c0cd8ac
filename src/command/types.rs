use crate::transport::FilePayload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    OpenFilePrompt,
    CancelPrompt,
    DropFiles(Vec<FilePayload>),
    Refetch,
    IncrementCounter,
    NewUploadSlot,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionId {
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    OpenFilePrompt,
    CancelPrompt,
    DropFiles,
    Refetch,
    IncrementCounter,
    NewUploadSlot,
    Quit,
    Input,
    Upload,
    Query,
    Document,
    RenderPage,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NextPage => "next-page",
            Self::PrevPage => "prev-page",
            Self::FirstPage => "first-page",
            Self::LastPage => "last-page",
            Self::OpenFilePrompt => "open-file-prompt",
            Self::CancelPrompt => "cancel-prompt",
            Self::DropFiles => "drop-files",
            Self::Refetch => "refetch",
            Self::IncrementCounter => "increment-counter",
            Self::NewUploadSlot => "new-upload-slot",
            Self::Quit => "quit",
            Self::Input => "input",
            Self::Upload => "upload",
            Self::Query => "query",
            Self::Document => "document",
            Self::RenderPage => "render-page",
        }
    }
}

impl Command {
    pub fn action_id(&self) -> ActionId {
        match self {
            Self::NextPage => ActionId::NextPage,
            Self::PrevPage => ActionId::PrevPage,
            Self::FirstPage => ActionId::FirstPage,
            Self::LastPage => ActionId::LastPage,
            Self::OpenFilePrompt => ActionId::OpenFilePrompt,
            Self::CancelPrompt => ActionId::CancelPrompt,
            Self::DropFiles(_) => ActionId::DropFiles,
            Self::Refetch => ActionId::Refetch,
            Self::IncrementCounter => ActionId::IncrementCounter,
            Self::NewUploadSlot => ActionId::NewUploadSlot,
            Self::Quit => ActionId::Quit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Noop,
    QuitRequested,
}
