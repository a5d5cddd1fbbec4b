use super::*;

fn size(w: u32, h: u32) -> PixelSize {
    PixelSize::new(w, h)
}

#[test]
fn pool_honors_bucket_cap() {
    let mut p = SurfacePool::new(SurfacePoolOpts {
        max_pool_bytes: 1 << 30,
        max_surfaces_per_bucket: 1,
        max_live_bytes: None,
    });
    let d = size(8, 8);

    let a = p.borrow(d).unwrap();
    let b = p.borrow(d).unwrap();
    assert_eq!(p.stats().live_surfaces, 2);
    p.release(d, a);
    p.release(d, b);

    let st = p.stats();
    assert_eq!(st.retained_surfaces, 1);
    assert_eq!(st.live_surfaces, 0);
    assert_eq!(st.live_bytes, 0);
}

#[test]
fn pool_honors_global_byte_cap() {
    let bytes_8x8 = size(8, 8).byte_len();
    let mut p = SurfacePool::new(SurfacePoolOpts {
        max_pool_bytes: bytes_8x8,
        max_surfaces_per_bucket: 8,
        max_live_bytes: None,
    });
    let d = size(8, 8);

    let a = p.borrow(d).unwrap();
    let b = p.borrow(d).unwrap();
    p.release(d, a);
    p.release(d, b);

    let st = p.stats();
    assert_eq!(st.retained_bytes, bytes_8x8);
    assert_eq!(st.retained_surfaces, 1);
    assert!(st.dropped_on_release >= 1);
}

#[test]
fn reused_pixmaps_come_back_cleared() {
    let mut p = SurfacePool::new(SurfacePoolOpts::default());
    let d = size(4, 4);

    let mut a = p.borrow(d).unwrap();
    a.data_as_u8_slice_mut().fill(200);
    p.release(d, a);

    let b = p.borrow(d).unwrap();
    assert!(b.data_as_u8_slice().iter().all(|&v| v == 0));
    assert_eq!(p.stats().reused_surfaces, 1);
    assert_eq!(p.stats().alloc_surfaces, 1);
}

#[test]
fn live_budget_refuses_oversized_borrows() {
    let mut p = SurfacePool::new(SurfacePoolOpts {
        max_live_bytes: Some(size(8, 8).byte_len()),
        ..SurfacePoolOpts::default()
    });

    let a = p.borrow(size(8, 8)).unwrap();
    let err = p.borrow(size(1, 1)).unwrap_err();
    assert!(err.is_resource_exhaustion());
    assert_eq!(p.stats().failed_allocations, 1);
    assert_eq!(p.stats().live_surfaces, 1);

    p.release(size(8, 8), a);
    assert!(p.borrow(size(1, 1)).is_ok());
}

#[test]
fn degenerate_and_oversized_dimensions_fail() {
    let mut p = SurfacePool::new(SurfacePoolOpts::default());
    assert!(p.borrow(size(0, 10)).is_err());
    assert!(p.borrow(size(70_000, 1)).is_err());
    assert_eq!(p.stats().live_surfaces, 0);
    assert_eq!(p.stats().failed_allocations, 2);
}

#[test]
fn detach_and_purge_update_accounting() {
    let mut p = SurfacePool::new(SurfacePoolOpts::default());
    let d = size(2, 2);
    let a = p.borrow(d).unwrap();
    let b = p.borrow(d).unwrap();
    drop(a);
    p.detach(d);
    p.release(d, b);
    assert_eq!(p.stats().live_surfaces, 0);
    assert_eq!(p.stats().retained_surfaces, 1);

    p.purge();
    assert_eq!(p.stats().retained_surfaces, 0);
    assert_eq!(p.stats().retained_bytes, 0);
}
