use decider_core::{BbKey, Blackboard};

#[test]
fn blackboard_set_get_remove_roundtrip() {
    let k_u32 = BbKey::<u32>::new("ammo");
    let k_str = BbKey::<String>::new("target");

    let mut bb = Blackboard::new();
    assert!(!bb.contains(k_u32));

    bb.set(k_u32, 123);
    bb.set(k_str, "hello".to_string());

    assert_eq!(bb.try_get(k_u32).copied(), Some(123));
    assert_eq!(bb.try_get(k_str).map(|s| s.as_str()), Some("hello"));
    assert_eq!(bb.len(), 2);

    assert_eq!(bb.remove(k_u32), Some(123));
    assert_eq!(bb.try_get(k_u32), None);
}

#[test]
fn get_mut_updates_in_place() {
    let key = BbKey::<u32>::new("hits");
    let mut bb = Blackboard::new();
    bb.set(key, 1);
    if let Some(hits) = bb.get_mut(key) {
        *hits += 2;
    }
    assert_eq!(bb.try_get(key).copied(), Some(3));
}

#[test]
#[should_panic(expected = "blackboard type mismatch")]
fn blackboard_type_mismatch_panics() {
    let mut bb = Blackboard::new();
    bb.set(BbKey::<u32>::new("n"), 1u32);
    let _ = bb.try_get(BbKey::<i32>::new("n"));
}
