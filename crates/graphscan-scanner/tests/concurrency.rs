/// Concurrent use of one scanner
mod common;

use common::{Host, ids, init_logging};
use graphscan_scanner::{DynObject, FieldInfo, ObjectRef, ScannerOptions, TypeInfo};
use std::sync::Arc;
use std::thread;

/// Independent roots, each a session with a chain of `depth` tracked nodes behind a private field
fn sessions(host: &Host, count: usize) -> anyhow::Result<Vec<ObjectRef>> {
    let mut roots = Vec::with_capacity(count);
    for depth in 0..count {
        let session = DynObject::new(&host.session);
        let mut tail: Option<ObjectRef> = None;
        for _ in 0..depth {
            let node = host.node();
            node.set("next", tail.take())?;
            tail = Some(node as ObjectRef);
        }
        session.set("history", tail)?;
        roots.push(session as ObjectRef);
    }
    Ok(roots)
}

#[test]
fn test_scan_all_matches_sequential_scans() -> anyhow::Result<()> {
    init_logging();
    let host = Host::new();
    let roots = sessions(&host, 12)?;
    let scanner = host.scanner_with(
        Vec::new(),
        ScannerOptions {
            threads: Some(4),
            ..Default::default()
        },
    );
    let targets = [host.tracked.clone()];

    let parallel = scanner.scan_all(&targets, &roots)?;
    assert_eq!(parallel.len(), roots.len());
    for (depth, (root, outcome)) in roots.iter().zip(&parallel).enumerate() {
        let sequential = scanner.scan(&targets, Some(root))?;
        assert_eq!(ids(&outcome.matches), ids(&sequential));
        assert_eq!(outcome.matches.len(), depth);
    }
    Ok(())
}

#[test]
fn test_threads_share_scanner_without_interference() -> anyhow::Result<()> {
    let host = Host::new();
    let roots = sessions(&host, 16)?;
    let scanner = host.scanner(Vec::new());
    let targets = [host.tracked.clone()];

    let expected: Vec<usize> = (0..roots.len()).collect();
    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    roots
                        .iter()
                        .map(|root| scanner.scan(&targets, Some(root)).map(|m| m.len()))
                        .collect::<graphscan_scanner::Result<Vec<usize>>>()
                })
            })
            .collect();
        for handle in handles {
            let counts = handle.join().expect("scan thread panicked");
            assert_eq!(counts.expect("scan failed"), expected);
        }
    });

    let history = host.session.find_field("history").unwrap();
    assert_eq!(history.override_count(), 0);
    assert!(!history.is_accessible());
    Ok(())
}

#[test]
fn test_filters_change_while_scanning() -> anyhow::Result<()> {
    let host = Host::new();
    let roots = sessions(&host, 8)?;
    let scanner = host.scanner(Vec::new());
    let targets = [host.tracked.clone()];

    thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0..50 {
                let filter: graphscan_scanner::FilterRef =
                    Arc::new(|ty: &TypeInfo, _: Option<&FieldInfo>| ty.name() != "host.graph.Node");
                scanner.add_filter(filter.clone());
                scanner.remove_filter(&filter);
            }
        });
        for _ in 0..20 {
            for root in &roots {
                let matches = scanner.scan(&targets, Some(root)).expect("scan failed");
                assert!(matches.len() <= roots.len());
            }
        }
    });
    assert!(scanner.filters().dynamic().is_empty());
    Ok(())
}
