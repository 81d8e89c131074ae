//! 调用栈渲染

use super::escape::escape_html;
use crate::session::{CallFrame, InitiatorStack, StackFrame};

/// 两种展示形式：日志行内可折叠的摘要、详情面板里的完整列表。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackStyle {
    Collapsible,
    Expanded,
}

fn boundary_row(label: &str) -> String {
    format!(
        r#"<div class="stack-frame async-boundary">--- {} ---</div>"#,
        escape_html(label)
    )
}

fn frame_row(frame: &CallFrame, anonymous: &str) -> String {
    let name = frame
        .display_name()
        .filter(|n| !n.is_empty())
        .unwrap_or(anonymous);
    let mut html = format!(
        r#"<div class="stack-frame">at <span class="stack-fn">{}</span>"#,
        escape_html(name)
    );
    if let Some(loc) = frame.location.frame_label() {
        html.push_str(&format!(
            r#" <span class="stack-location">({})</span>"#,
            escape_html(&loc)
        ));
    }
    html.push_str("</div>");
    html
}

/// 空栈返回空串。
pub fn render_stack_trace(frames: &[StackFrame], style: StackStyle) -> String {
    if frames.is_empty() {
        return String::new();
    }
    let anonymous = match style {
        StackStyle::Collapsible => "",
        StackStyle::Expanded => "(anonymous)",
    };
    let rows: String = frames
        .iter()
        .map(|f| match f {
            StackFrame::AsyncBoundary(label) => boundary_row(label),
            StackFrame::Call(frame) => frame_row(frame, anonymous),
        })
        .collect();
    match style {
        StackStyle::Collapsible => format!(
            r#"<details class="stack-trace"><summary>Stack trace</summary><div class="stack-frames">{rows}</div></details>"#
        ),
        StackStyle::Expanded => format!(r#"<div class="stack-frames">{rows}</div>"#),
    }
}

/// 发起方调用栈：沿 `parent` 链展开，每跨一层异步边界插一行分隔；
/// 链长超过 `max_depth` 时截断。
pub fn render_initiator_stack(stack: &InitiatorStack, max_depth: usize) -> String {
    if stack.call_frames.is_empty() && stack.parent.is_none() {
        return String::new();
    }
    let mut html = String::from(r#"<div class="stack-frames">"#);
    for frame in &stack.call_frames {
        html.push_str(&frame_row(frame, "(anonymous)"));
    }
    if let Some(parent) = &stack.parent {
        if max_depth == 0 {
            html.push_str(&boundary_row("..."));
        } else {
            let desc = parent
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or("async");
            html.push_str(&boundary_row(desc));
            html.push_str(&render_initiator_stack(parent, max_depth - 1));
        }
    }
    html.push_str("</div>");
    html
}
