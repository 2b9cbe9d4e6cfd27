//! Property tests for group naming, escaping, and registry membership.

use std::sync::Arc;

use proptest::prelude::*;
use proptest::test_runner::Config;
use tokio::sync::mpsc;

use agora_realtime::adapters::ws::{ConnectionHandle, GroupRegistry};
use agora_realtime::domain::foundation::{ChatId, ConnectionId};
use agora_realtime::domain::messaging::{html_escape, GroupName};

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn valid_group_names_roundtrip(name in "[A-Za-z0-9_-]{1,100}") {
        let group = GroupName::parse(name.clone()).expect("valid name");
        prop_assert_eq!(group.as_str(), name.as_str());
    }

    #[test]
    fn names_with_forbidden_characters_are_rejected(
        prefix in "[A-Za-z0-9_-]{0,10}",
        bad in "[ /.:#@]",
        suffix in "[A-Za-z0-9_-]{0,10}"
    ) {
        let name = format!("{prefix}{bad}{suffix}");
        prop_assert!(GroupName::parse(name).is_err());
    }

    #[test]
    fn chat_group_names_always_parse(id in 0_i64..1_000_000) {
        let group = GroupName::chat(ChatId::new(id));
        prop_assert!(GroupName::parse(group.as_str().to_string()).is_ok());
    }

    #[test]
    fn escaped_text_never_contains_markup_characters(raw in ".{0,200}") {
        let escaped = html_escape(&raw);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
    }

    #[test]
    fn join_then_leave_restores_membership(extra_leaves in 1_usize..4) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        rt.block_on(async {
            let registry = GroupRegistry::new();
            let group = GroupName::parse("chat_1").expect("valid name");
            let (tx, _rx) = mpsc::channel::<Arc<String>>(1);
            let handle = ConnectionHandle::new(ConnectionId::new(), tx);
            let id = handle.id();

            registry.join(&group, handle.clone()).await;
            registry.join(&group, handle).await;
            assert_eq!(registry.member_count(&group).await, 1);

            // Any number of leaves lands in the same state as one.
            for _ in 0..extra_leaves {
                registry.leave(&group, id).await;
            }
            assert_eq!(registry.member_count(&group).await, 0);
        });
    }
}
