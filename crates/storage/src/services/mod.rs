pub mod articles;
pub mod judge_consistency;
pub mod score_assembly;
pub mod scoring;
pub mod scoring_workflow;
pub mod winner;
