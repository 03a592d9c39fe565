pub mod delay;
pub mod events;
pub mod machine;
pub mod rank;
