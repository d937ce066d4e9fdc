/// Unique question identifier (stable across runs).
/// Example: `aws_saa::resilient_architectures::q_0142`
pub type QuestionId = String;
/// Identifier of the stratification group a question belongs to
/// (a certification domain or exam section).
/// Examples: `resilient_architectures`, `security_compliance`
pub type GroupId = String;
/// Optional finer-grained topic identifier within a group.
/// Examples: `vpc_peering`, `iam_policies`
pub type TopicId = String;
/// Identifier of a certification/test composition.
/// Examples: `aws_saa_c03`, `ckad_2025`
pub type CompositionId = String;
/// Identifier of the source that produced a question feed.
/// Examples: `bundled_snapshot`, `question_db`
pub type SourceId = String;
