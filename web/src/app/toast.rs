use yew::prelude::*;

/// How long a transient notification stays on screen
pub const TOAST_MS: u32 = 4000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

/// A transient, dismissible notification
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    #[prop_or_default]
    pub toast: Option<Toast>,
    pub on_dismiss: Callback<()>,
}

#[function_component]
pub fn ToastView(props: &ToastProps) -> Html {
    let Some(toast) = &props.toast else {
        return html! {};
    };
    let on_dismiss = props.on_dismiss.clone();

    html! {
        <div class={classes!("toast", toast.kind.css_class())} role="status">
            <strong>{ toast.kind.title() }</strong>
            <span>{ &toast.message }</span>
            <button class="dismiss" onclick={move |_| on_dismiss.emit(())}>{"×"}</button>
        </div>
    }
}
