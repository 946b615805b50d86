/// Editor dialog for one record type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DialogState<F> {
    #[default]
    Closed,
    New(F),
    Edit {
        id: i64,
        form: F,
    },
}

/// What a submitted dialog asks the server to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogSubmit<F> {
    Create(F),
    Update { id: i64, form: F },
}

impl<F> DialogState<F> {
    pub fn open_new(&mut self, form: F) {
        *self = DialogState::New(form);
    }

    pub fn open_edit(&mut self, id: i64, form: F) {
        *self = DialogState::Edit { id, form };
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }

    pub fn form_mut(&mut self) -> Option<&mut F> {
        match self {
            DialogState::Closed => None,
            DialogState::New(form) | DialogState::Edit { form, .. } => Some(form),
        }
    }

    pub fn close(&mut self) {
        *self = DialogState::Closed;
    }

    /// Closes the dialog and hands back its form. `None` if it was closed.
    pub fn submit(&mut self) -> Option<DialogSubmit<F>> {
        match std::mem::replace(self, DialogState::Closed) {
            DialogState::Closed => None,
            DialogState::New(form) => Some(DialogSubmit::Create(form)),
            DialogState::Edit { id, form } => Some(DialogSubmit::Update { id, form }),
        }
    }
}
