//! Process-wide catalog initialization.
//!
//! Kept in its own test binary: the global index can be installed once per process.

mod common;

use common::fixtures::sample_catalog;
use earthcmap::catalog::{global, init_global};
use earthcmap::{build_global, BuildOptions, EarthCmapError, SpecResolver};

#[test]
fn test_global_catalog_lifecycle() {
    assert!(matches!(global(), Err(EarthCmapError::Config { .. })));
    assert!(matches!(
        build_global("ir", &BuildOptions::default()),
        Err(EarthCmapError::Config { .. })
    ));

    let dir = sample_catalog();
    let index = init_global(dir.path()).unwrap();
    assert_eq!(index.len(), 5);
    assert_eq!(index.dir(), dir.path());

    // A second installation is refused and the first one stays
    assert!(matches!(
        init_global(dir.path()),
        Err(EarthCmapError::Config { .. })
    ));
    assert_eq!(global().unwrap().len(), 5);

    // The index no longer needs the files
    drop(dir);
    assert_eq!(global().unwrap().resolve("sst").unwrap().resolution, Some(32));

    let (cmap, _) = build_global("rain", &BuildOptions::default()).unwrap();
    assert_eq!(cmap.units(), "mm");
    assert!(build_global("missing", &BuildOptions::default())
        .unwrap_err()
        .is_not_found());
}
