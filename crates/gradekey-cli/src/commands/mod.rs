pub mod batch;
pub mod compare;
pub mod distractors;
pub mod grade;
pub mod init;
pub mod normalize;
pub mod validate;
