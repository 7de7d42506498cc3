//! 全局提示模块
//!
//! 变更类操作统一从这里冒泡结果：成功绿、失败红，三秒后自动消失。

use leptos::prelude::*;

/// 提示停留时长
const TOAST_DURATION: std::time::Duration = std::time::Duration::from_secs(3);

/// 提示级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

/// 提示队列
#[derive(Clone, Copy)]
pub struct Toaster {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl Toaster {
    fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message.into());
    }

    fn push(&self, level: ToastLevel, message: String) {
        let id = self.next_id.get_untracked() + 1;
        self.next_id.set(id);
        self.toasts
            .update(|toasts| toasts.push(Toast { id, level, message }));

        // 到点自动出队
        let toasts = self.toasts;
        set_timeout(
            move || toasts.update(|list| list.retain(|toast| toast.id != id)),
            TOAST_DURATION,
        );
    }
}

/// 提供提示队列到 Context
pub fn provide_toaster() -> Toaster {
    let toaster = Toaster::new();
    provide_context(toaster);
    toaster
}

/// 从 Context 获取提示队列
pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().expect("Toaster not found in context. Ensure App provides it.")
}

/// 提示浮层，挂在 App 根部
#[component]
pub fn ToastHost() -> impl IntoView {
    let toaster = use_toaster();
    let toasts = toaster.toasts;

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let class = match toast.level {
                        ToastLevel::Success => "alert alert-success shadow-lg",
                        ToastLevel::Error => "alert alert-error shadow-lg",
                    };
                    view! {
                        <div class=class>
                            <span>{toast.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
