//! 录制数据模型与流归一化
//!
//! 此模块把取回的原始录制（控制台日志、网络请求、WebSocket 日志）
//! 转成按相对时间排序的类型化条目。

// 子模块声明
mod console;
mod lenient;
mod location;
mod network;
mod normalize;
mod recording;
mod remote_object;
mod websocket;

// 重新导出公共接口
pub use console::{ArgList, CaptureSource, ConsoleEntry, ConsolePayload};
pub use location::{CallFrame, CodeLocation, Initiator, InitiatorStack, StackFrame};
pub use network::{Headers, NetworkEntry, RedirectStep, RequestInfo, ResponseContent, ResponseInfo};
pub use normalize::{Timed, normalize_console, normalize_network, normalize_websockets};
pub use recording::{RecordingMetadata, RecordingSession, RecordingSnapshot};
pub use remote_object::{ObjectPreview, PropertyPreview, RemoteObject, RemoteType};
pub use websocket::{FrameDirection, WebSocketFrame, WebSocketLog};
pub(crate) use lenient::{number_text, scalar_to_string};
