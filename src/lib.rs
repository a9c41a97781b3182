pub mod common {
    pub mod collections;
    pub mod config;
    pub mod log;
}
pub mod model {
    pub mod history;
}
pub mod placement;
pub mod sys {
    pub mod geometry;
    pub mod screen;
    pub mod window;
}
