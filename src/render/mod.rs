//! 值渲染
//!
//! 把采集到的运行时值渲染成有界、已转义的标记文本。两种采集格式各有一个
//! [`ValueRenderer`] 实现；格式在归一化时已经判定，这里不再做格式探测。
//! 渲染是全函数：任何输入形状都不会 panic，只会退化为尽力而为的文本。

mod escape;
pub mod format;
mod legacy;
mod remote;
mod stack;

pub use escape::escape_html;
pub use legacy::LegacyValueRenderer;
pub use remote::{MAX_PREVIEW_DEPTH, RemoteObjectRenderer};
pub use stack::{StackStyle, render_initiator_stack, render_stack_trace};

/// 单个值的渲染接口
pub trait ValueRenderer {
    type Value;

    fn render(&self, value: &Self::Value) -> String;

    /// 参数列表以空格连接
    fn render_all(&self, values: &[Self::Value]) -> String {
        values
            .iter()
            .map(|v| self.render(v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
