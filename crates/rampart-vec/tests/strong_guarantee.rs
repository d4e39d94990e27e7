// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

#[cfg(test)]
mod strong_guarantee_tests {
    use rampart_test_utils::{AllocatorBehaviour, Tracker, Tracked, TrackingAllocator, catch_panic};
    use rampart_vec::{Vector, VectorError};

    fn full(tracker: &Tracker, alloc: &TrackingAllocator) -> Vector<Tracked, TrackingAllocator> {
        let vector = Vector::from_slice_in(&tracker.make_all(0..4), alloc.clone()).expect("Failed to from_slice_in(..)");
        assert_eq!(vector.len(), vector.capacity());
        vector
    }

    fn assert_untouched(vector: &Vector<Tracked, TrackingAllocator>, tracker: &Tracker, alloc: &TrackingAllocator) {
        assert_eq!(*vector, [0, 1, 2, 3]);
        assert_eq!(vector.capacity(), 4);
        assert_eq!(tracker.live(), 4);
        assert_eq!(alloc.stats().live_blocks(), 1);
    }

    #[test]
    fn test_push_relocation_panic() {
        for at in 0..4 {
            let tracker = Tracker::new();
            let alloc = TrackingAllocator::default();
            alloc.scrub_on_relocate(true);
            let mut vector = full(&tracker, &alloc);
            let ptr = vector.as_ptr();

            alloc.change_behaviour(AllocatorBehaviour::PanicRelocateAt(at));
            let result = catch_panic(|| {
                vector.push(tracker.make(99)).map(|_| ())
            });

            assert!(result.is_none());
            assert_eq!(vector.as_ptr(), ptr);
            assert_untouched(&vector, &tracker, &alloc);
        }
    }

    #[test]
    fn test_push_construct_panic() {
        let tracker = Tracker::new();
        let alloc = TrackingAllocator::default();
        let mut vector = full(&tracker, &alloc);

        alloc.change_behaviour(AllocatorBehaviour::PanicConstructAt(0));
        let result = catch_panic(|| vector.push(tracker.make(99)).map(|_| ()));

        assert!(result.is_none());
        assert_untouched(&vector, &tracker, &alloc);
    }

    #[test]
    fn test_push_alloc_failure() {
        let tracker = Tracker::new();
        let alloc = TrackingAllocator::default();
        let mut vector = full(&tracker, &alloc);

        alloc.change_behaviour(AllocatorBehaviour::FailAllocateAt(0));
        let result = vector.push(tracker.make(99)).map(|_| ());

        assert!(matches!(result, Err(VectorError::Alloc(_))));
        assert_untouched(&vector, &tracker, &alloc);
    }

    #[test]
    fn test_insert_relocation_panic() {
        // Three suffix relocations, then one prefix relocation.
        for at in 0..4 {
            let tracker = Tracker::new();
            let alloc = TrackingAllocator::default();
            alloc.scrub_on_relocate(true);
            let mut vector = full(&tracker, &alloc);

            alloc.change_behaviour(AllocatorBehaviour::PanicRelocateAt(at));
            let result = catch_panic(|| vector.insert(1, tracker.make(99)));

            assert!(result.is_none());
            assert_untouched(&vector, &tracker, &alloc);
        }
    }

    #[test]
    fn test_insert_n_clone_panic() {
        let tracker = Tracker::new();
        let alloc = TrackingAllocator::default();
        let mut vector = full(&tracker, &alloc);
        let value = tracker.make(7);

        tracker.panic_on_clone(2);
        let result = catch_panic(|| vector.insert_n(2, 5, &value));

        assert!(result.is_none());
        drop(value);
        assert_untouched(&vector, &tracker, &alloc);
    }

    #[test]
    fn test_insert_n_alloc_failure() {
        let tracker = Tracker::new();
        let alloc = TrackingAllocator::default();
        let mut vector = full(&tracker, &alloc);
        let value = tracker.make(7);

        alloc.change_behaviour(AllocatorBehaviour::FailAllocateAt(0));
        let result = vector.insert_n(0, 3, &value);

        assert!(matches!(result, Err(VectorError::Alloc(_))));
        drop(value);
        assert_untouched(&vector, &tracker, &alloc);
    }

    #[test]
    fn test_insert_from_slice_relocation_panic() {
        let tracker = Tracker::new();
        let alloc = TrackingAllocator::default();
        let mut vector = full(&tracker, &alloc);
        let src = tracker.make_all(10..13);

        alloc.change_behaviour(AllocatorBehaviour::PanicRelocateAt(2));
        let result = catch_panic(|| vector.insert_from_slice(3, &src));

        assert!(result.is_none());
        drop(src);
        assert_untouched(&vector, &tracker, &alloc);
    }

    #[test]
    fn test_reserve_relocation_panic() {
        let tracker = Tracker::new();
        let alloc = TrackingAllocator::default();
        alloc.scrub_on_relocate(true);
        let mut vector = full(&tracker, &alloc);

        alloc.change_behaviour(AllocatorBehaviour::PanicRelocateAt(3));
        let result = catch_panic(|| vector.reserve(32));

        assert!(result.is_none());
        assert_untouched(&vector, &tracker, &alloc);
    }

    #[test]
    fn test_insert_iter_relocation_panic() {
        let tracker = Tracker::new();
        let alloc = TrackingAllocator::default();
        let mut vector = full(&tracker, &alloc);
        let items = tracker.make_all(10..16);

        alloc.change_behaviour(AllocatorBehaviour::PanicRelocateAt(1));
        let result = catch_panic(|| vector.insert_iter(2, items));

        assert!(result.is_none());
        assert_untouched(&vector, &tracker, &alloc);
    }

    #[test]
    fn test_recovers_after_failure() {
        let tracker = Tracker::new();
        let alloc = TrackingAllocator::default();
        let mut vector = full(&tracker, &alloc);

        alloc.change_behaviour(AllocatorBehaviour::FailAllocateAt(0));
        assert!(vector.push(tracker.make(4)).is_err());

        vector.push(tracker.make(4)).expect("Failed to push(..)");

        assert_eq!(vector, [0, 1, 2, 3, 4]);
        assert_eq!(vector.capacity(), 8);
        assert_eq!(tracker.live(), 5);
    }
}
