pub mod experience;
pub mod ranking;
pub mod role;
pub mod scoring;
pub mod skills;
pub mod weights;

pub use ranking::rank_applications;
pub use scoring::compute_match_score;
