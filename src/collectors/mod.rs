pub mod disk;
pub mod docker;
pub mod docker_worker;
pub mod mounts;
