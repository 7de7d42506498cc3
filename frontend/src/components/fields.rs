//! 表单字段错误提示

use bookworm_shared::validate::FieldErrors;
use leptos::prelude::*;

/// 渲染指定字段的校验错误；字段无错误时不输出节点
#[component]
pub fn FieldError(errors: RwSignal<FieldErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors.get().get(field).cloned().map(|message| {
            view! { <span class="label-text-alt text-error mt-1">{message}</span> }
        })
    }
}
