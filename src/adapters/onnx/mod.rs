pub mod facade;
pub mod labels;
pub mod yolo_engine;
