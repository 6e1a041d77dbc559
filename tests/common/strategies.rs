use proptest::prelude::*;

/// Strategy for generating a registration plan
///
/// Each entry is `(is_factory, is_disposable)`; positions are labels.
pub fn registration_plan_strategy() -> impl Strategy<Value = Vec<(bool, bool)>> {
    prop::collection::vec((any::<bool>(), any::<bool>()), 0..12)
}

/// Strategy for generating input queue settings that must parse
pub fn valid_queue_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_.]{0,30}",
        ("[a-z][a-z0-9_-]{0,15}", "[a-z][a-z0-9_.]{0,30}")
            .prop_map(|(machine, queue)| format!("{machine}@{queue}")),
    ]
}
