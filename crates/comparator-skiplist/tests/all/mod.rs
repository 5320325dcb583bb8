macro_rules! tests_for_all_skiplists {
    ($auto_recycle:literal $(,)?) => {
        fn options() -> SkiplistOptions {
            SkiplistOptions::new().auto_recycle($auto_recycle).seed(0x_5151_5151)
        }

        fn duplicate_options() -> SkiplistOptions {
            options().allow_duplicates(true)
        }

        fn by_key(lhs: &(u32, u32), rhs: &(u32, u32)) -> bool {
            lhs.0 < rhs.0
        }

        /// Dispose of a removed entry the way this flavor of skiplist expects.
        fn dispose<V, Cmp>(list: &mut Skiplist<V, Cmp>, removed: &Removed<V>) {
            if $auto_recycle {
                assert!(!list.recycle(removed.id()), "auto-recycled nodes cannot be recycled");
            } else {
                assert!(list.recycle(removed.id()));
                assert!(!list.recycle(removed.id()), "nodes can be recycled only once");
            }
        }

        fn collect<V: Clone, Cmp>(list: &Skiplist<V, Cmp>) -> Vec<V> {
            // Walk with `Entry::next`, and confirm that `iter` agrees.
            let mut values = Vec::new();
            let mut entry = list.first();
            while let Some(current) = entry {
                values.push(current.value().clone());
                entry = current.next();
            }

            let iterated: Vec<V> = list.iter().cloned().collect();
            assert_eq!(values.len(), iterated.len());
            assert_eq!(list.iter().len(), list.len());
            values
        }

        // ================================
        //  Scenarios
        // ================================

        #[test]
        fn sorted_unique_list() {
            let mut list = Skiplist::with_options(Ascending, options()).unwrap();

            for value in [1, 5, 9, 3, 7, 0] {
                let (_, inserted) = list.put(value);
                assert!(inserted);
            }

            assert_eq!(list.len(), 6);
            assert_eq!(collect(&list), [0, 1, 3, 5, 7, 9]);
            assert!(list.get(&4).is_none());

            let removed = list.delete(&3).unwrap();
            assert_eq!(*removed.value(), 3);
            assert_eq!(list.len(), 5);
            dispose(&mut list, &removed);

            assert!(list.delete(&3).is_none());
            assert_eq!(list.len(), 5);
            assert_eq!(collect(&list), [0, 1, 5, 7, 9]);
        }

        #[test]
        fn descending_duplicates() {
            let mut list = Skiplist::with_options(Descending, duplicate_options()).unwrap();

            let ids: Vec<NodeId> = (0..3)
                .map(|_| {
                    let (id, inserted) = list.put(5_u32);
                    assert!(inserted);
                    id
                })
                .collect();

            assert_eq!(list.len(), 3);
            assert_ne!(ids[0], ids[1]);
            assert_ne!(ids[1], ids[2]);
            assert_ne!(ids[0], ids[2]);

            assert_eq!(list.get(&5).map(|entry| entry.id()), Some(ids[0]));
            assert_eq!(list.get_last(&5).map(|entry| entry.id()), Some(ids[2]));

            let (id, inserted) = list.get_or_put(5);
            assert!(!inserted);
            assert_eq!(id, ids[0]);
            assert_eq!(list.len(), 3);

            list.extend([7, 1]);
            assert_eq!(collect(&list), [7, 5, 5, 5, 1]);
        }

        #[test]
        fn delete_if_in_run() {
            let mut list = Skiplist::with_options(by_key, duplicate_options()).unwrap();
            for n in 0..10 {
                list.put((1, n));
            }

            let removed = list.delete_if(&(1, 0), |entry| entry.value().1 == 2).unwrap();
            assert_eq!(*removed.value(), (1, 2));
            dispose(&mut list, &removed);

            assert_eq!(list.len(), 9);
            assert_eq!(
                collect(&list),
                [(1, 0), (1, 1), (1, 3), (1, 4), (1, 5), (1, 6), (1, 7), (1, 8), (1, 9)],
            );

            // The predicate only sees the run of equivalent entries.
            list.put((0, 2));
            list.put((2, 2));
            let mut seen = Vec::new();
            let removed = list.delete_if(&(1, 0), |entry| {
                seen.push(*entry.value());
                false
            });
            assert!(removed.is_none());
            assert_eq!(seen.len(), 9);
            assert!(seen.iter().all(|&(key, _)| key == 1));
        }

        // ================================
        //  Duplicate ordering
        // ================================

        #[test]
        fn duplicates_delete_in_insertion_order() {
            let mut list = Skiplist::with_options(by_key, duplicate_options()).unwrap();
            for n in 0..6 {
                list.put((3, n));
                list.put((n, 100));
            }

            for n in 0..6 {
                let removed = list.delete(&(3, 0)).unwrap();
                if n == 3 {
                    // `(3, 100)` was inserted after `(3, 0)`, `(3, 1)` and `(3, 2)`.
                    assert_eq!(*removed.value(), (3, 3));
                }
                dispose(&mut list, &removed);
            }

            let remaining: Vec<u32> = collect(&list)
                .into_iter()
                .filter(|&(key, _)| key == 3)
                .map(|(_, n)| n)
                .collect();
            assert_eq!(remaining, [5]);

            assert!(list.delete(&(3, 0)).is_some());
            assert!(list.delete(&(3, 0)).is_none());
        }

        #[test]
        fn put_front_is_lifo() {
            let mut list = Skiplist::with_options(by_key, duplicate_options()).unwrap();
            list.put((2, 0));
            for n in 1..5 {
                list.put_front((2, n));
            }
            list.put((2, 5));

            assert_eq!(
                collect(&list),
                [(2, 4), (2, 3), (2, 2), (2, 1), (2, 0), (2, 5)],
            );
            assert_eq!(list.get(&(2, 0)).map(|entry| *entry.value()), Some((2, 4)));
            assert_eq!(list.get_last(&(2, 0)).map(|entry| *entry.value()), Some((2, 5)));
        }

        #[test]
        fn unique_put_overwrites_in_place() {
            let mut list = Skiplist::with_options(by_key, options()).unwrap();

            let (id, inserted) = list.put((4, 0));
            assert!(inserted);
            let (same, inserted) = list.put_front((4, 1));
            assert!(!inserted);
            assert_eq!(same, id);
            assert_eq!(list.value(id), Some(&(4, 1)));

            let (same, inserted) = list.get_or_put((4, 2));
            assert!(!inserted);
            assert_eq!(same, id);
            assert_eq!(list.value(id), Some(&(4, 1)));
            assert_eq!(list.len(), 1);
        }

        // ================================
        //  Identities and the node pool
        // ================================

        #[test]
        fn stale_and_foreign_ids() {
            let mut list = Skiplist::with_options(Ascending, duplicate_options()).unwrap();
            let mut other = Skiplist::with_options(Ascending, duplicate_options()).unwrap();

            let (id, _) = list.put(10_u32);
            let (other_id, _) = other.put(10_u32);

            assert!(!other.is_linked(id));
            assert!(other.delete_by_identity(id).is_none());
            assert!(!other.recycle(id));
            assert_eq!(other.len(), 1);
            assert!(other.is_linked(other_id));

            let removed = list.delete_by_identity(id).unwrap();
            assert_eq!(removed.id(), id);
            assert!(!list.is_linked(id));
            assert!(list.delete_by_identity(id).is_none());

            if !$auto_recycle {
                // Detached nodes are not linked either.
                assert_eq!(list.detached_nodes(), 1);
                assert!(list.delete_by_identity(id).is_none());
                assert!(list.entry(id).is_none());
            }
            dispose(&mut list, &removed);
            assert_eq!(list.detached_nodes(), 0);
            assert_eq!(list.pooled_nodes(), 1);

            // The slot is reused, but the old identity stays stale.
            let (reused, _) = list.put(10);
            assert_ne!(reused, id);
            assert_eq!(list.pooled_nodes(), 0);
            assert!(list.delete_by_identity(id).is_none());
            assert!(list.value(id).is_none());
            assert_eq!(list.value(reused), Some(&10));
        }

        #[test]
        fn delete_by_identity_among_duplicates() {
            let mut list = Skiplist::with_options(by_key, duplicate_options()).unwrap();
            list.put((0, 0));
            let ids: Vec<NodeId> = (0..20).map(|n| list.put((1, n)).0).collect();
            list.put((2, 0));

            for index in [19, 0, 7, 8, 13] {
                let removed = list.delete_by_identity(ids[index]).unwrap();
                assert_eq!(removed.value().1, u32::try_from(index).unwrap());
                dispose(&mut list, &removed);
            }

            let run: Vec<u32> = collect(&list)
                .into_iter()
                .filter(|&(key, _)| key == 1)
                .map(|(_, n)| n)
                .collect();
            let expected: Vec<u32> = (0..20)
                .filter(|n| ![19, 0, 7, 8, 13].contains(n))
                .collect();
            assert_eq!(run, expected);
            assert_eq!(list.len(), 17);
        }

        #[test]
        fn pool_statistics() {
            let mut list = Skiplist::with_options(Ascending, options()).unwrap();
            list.extend(0..32_u32);

            let removed: Vec<Removed<u32>> = (0..16).filter_map(|n| list.delete(&n)).collect();
            assert_eq!(removed.len(), 16);

            if $auto_recycle {
                assert_eq!(list.pooled_nodes(), 16);
                assert_eq!(list.detached_nodes(), 0);
            } else {
                assert_eq!(list.pooled_nodes(), 0);
                assert_eq!(list.detached_nodes(), 16);
                for entry in &removed {
                    assert!(list.recycle(entry.id()));
                }
                assert_eq!(list.detached_nodes(), 0);
                assert_eq!(list.pooled_nodes(), 16);
            }

            // Shrinking the pool keeps every pooled slot available.
            list.shrink_pool(4);
            assert_eq!(list.pooled_nodes(), 16);

            list.extend(100..120);
            assert_eq!(list.pooled_nodes(), 0);
            assert_eq!(list.len(), 36);
            assert_eq!(collect(&list), (16..32).chain(100..120).collect::<Vec<_>>());
        }

        #[test]
        fn toggling_auto_recycle() {
            let mut list = Skiplist::with_options(Ascending, options()).unwrap();
            list.extend([1_u8, 2, 3]);
            assert_eq!(list.auto_recycle(), $auto_recycle);

            list.set_auto_recycle(!$auto_recycle);
            let removed = list.delete(&2).unwrap();

            if $auto_recycle {
                assert_eq!(list.detached_nodes(), 1);
                assert!(list.recycle(removed.id()));
            } else {
                assert_eq!(list.pooled_nodes(), 1);
                assert!(!list.recycle(removed.id()));
            }
            assert_eq!(list.detached_nodes(), 0);
            assert_eq!(list.pooled_nodes(), 1);
        }

        // ================================
        //  Small heights
        // ================================

        #[test]
        fn small_max_heights() {
            for max_height in [1, 2, 4] {
                let options = duplicate_options().max_height(max_height);
                let mut list = Skiplist::with_options(by_key, options).unwrap();
                assert_eq!(list.max_height(), max_height);

                for n in 0..200 {
                    list.put(((n * 7) % 50, n));
                }
                assert_eq!(list.len(), 200);

                let values = collect(&list);
                assert!(values.windows(2).all(|pair| pair[0].0 <= pair[1].0));

                for key in 0..50 {
                    let removed = list.delete(&(key, 0)).unwrap();
                    assert_eq!(removed.value().0, key);
                    // Within a run, entries keep their insertion order.
                    let next = list.get(&(key, 0)).map(|entry| entry.value().1);
                    assert!(next.is_some_and(|n| n > removed.value().1));
                    dispose(&mut list, &removed);
                }
                assert_eq!(list.len(), 150);
            }
        }

        // ================================
        //  Random workloads
        // ================================

        #[test]
        fn random_unique_workload() {
            let mut prng = Rand32::new(0x_1234_5678);
            let mut list = Skiplist::with_options(by_key, options().max_height(10)).unwrap();
            let mut model: BTreeMap<u32, u32> = BTreeMap::new();

            for step in 0..5_000_u32 {
                let key = prng.rand_range(0..300);
                let value = (key, step);

                match prng.rand_range(0..5) {
                    0 | 1 => {
                        let (id, inserted) = if step % 2 == 0 {
                            list.put(value)
                        } else {
                            list.put_front(value)
                        };
                        assert_eq!(inserted, model.insert(key, step).is_none());
                        assert_eq!(list.value(id), Some(&value));
                    }
                    2 => {
                        let (id, inserted) = list.get_or_put(value);
                        let expected = *model.entry(key).or_insert(step);
                        assert_eq!(inserted, expected == step);
                        assert_eq!(list.value(id), Some(&(key, expected)));
                    }
                    3 => {
                        let removed = list.delete(&(key, 0));
                        assert_eq!(
                            removed.as_ref().map(|removed| *removed.value()),
                            model.remove(&key).map(|payload| (key, payload)),
                        );
                        if let Some(removed) = removed {
                            if step % 3 == 0 {
                                dispose(&mut list, &removed);
                            }
                        }
                    }
                    _ => {
                        assert_eq!(
                            list.get(&(key, 0)).map(|entry| *entry.value()),
                            model.get(&key).map(|&payload| (key, payload)),
                        );
                        assert_eq!(list.contains(&(key, 0)), model.contains_key(&key));
                    }
                }

                assert_eq!(list.len(), model.len());
                if step % 250 == 0 {
                    let expected: Vec<(u32, u32)> = model.iter().map(|(&k, &v)| (k, v)).collect();
                    assert_eq!(collect(&list), expected);
                }
            }

            let expected: Vec<(u32, u32)> = model.into_iter().collect();
            assert_eq!(collect(&list), expected);
        }

        #[test]
        fn random_duplicate_workload() {
            let mut prng = Rand32::new(0x_8765_4321);
            let mut list = Skiplist::with_options(by_key, duplicate_options().max_height(8)).unwrap();
            let mut model: BTreeMap<u32, VecDeque<u32>> = BTreeMap::new();
            let mut ids: Vec<(NodeId, u32, u32)> = Vec::new();

            for step in 0..5_000_u32 {
                let key = prng.rand_range(0..40);

                match prng.rand_range(0..6) {
                    0 | 1 => {
                        let (id, inserted) = list.put((key, step));
                        assert!(inserted);
                        model.entry(key).or_default().push_back(step);
                        ids.push((id, key, step));
                    }
                    2 => {
                        let (id, inserted) = list.put_front((key, step));
                        assert!(inserted);
                        model.entry(key).or_default().push_front(step);
                        ids.push((id, key, step));
                    }
                    3 => {
                        let removed = list.delete(&(key, 0));
                        let expected = model.get_mut(&key).and_then(VecDeque::pop_front);
                        assert_eq!(removed.as_ref().map(|removed| removed.value().1), expected);
                        if let Some(removed) = removed {
                            dispose(&mut list, &removed);
                        }
                    }
                    4 => {
                        if ids.is_empty() {
                            continue;
                        }
                        let index = prng.rand_range(0..u32::try_from(ids.len()).unwrap());
                        let (id, key, payload) = ids.swap_remove(index as usize);

                        let run = model.entry(key).or_default();
                        let position = run.iter().position(|&n| n == payload);
                        let removed = list.delete_by_identity(id);

                        assert_eq!(removed.is_some(), position.is_some());
                        if let (Some(removed), Some(position)) = (removed, position) {
                            assert_eq!(*removed.value(), (key, payload));
                            run.remove(position);
                            dispose(&mut list, &removed);
                        }
                    }
                    _ => {
                        let run = model.get(&key).filter(|run| !run.is_empty());
                        assert_eq!(
                            list.get(&(key, 0)).map(|entry| entry.value().1),
                            run.and_then(|run| run.front().copied()),
                        );
                        assert_eq!(
                            list.get_last(&(key, 0)).map(|entry| entry.value().1),
                            run.and_then(|run| run.back().copied()),
                        );
                    }
                }

                let model_len: usize = model.values().map(VecDeque::len).sum();
                assert_eq!(list.len(), model_len);
            }

            let expected: Vec<(u32, u32)> = model
                .iter()
                .flat_map(|(&key, run)| run.iter().map(move |&n| (key, n)))
                .collect();
            assert_eq!(collect(&list), expected);
        }
    };
}

pub(crate) use tests_for_all_skiplists;
