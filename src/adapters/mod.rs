pub mod draw;
pub mod http;
pub mod onnx;
pub mod treatments;
