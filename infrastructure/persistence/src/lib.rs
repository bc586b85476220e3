pub mod db;
pub mod queue {
    pub mod entity;
    pub mod repository;
}
pub mod toll {
    pub mod entity;
    pub mod repository;
}
