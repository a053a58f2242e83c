use crate::models::units::ByteBase;
use crate::models::usage::DiskUsage;
use anyhow::{Context, Result};
use log::warn;

/// Usage of the filesystem containing `path`.
///
/// Never fails: an OS error is logged and reported as an all-zero reading so
/// the sampling loop keeps running.
pub fn read_system_usage(path: &str, base: ByteBase) -> DiskUsage {
    match statvfs_usage(path, base) {
        Ok(u)  => u,
        Err(e) => {
            warn!("disk usage for {} unavailable: {:#}", path, e);
            DiskUsage::default()
        }
    }
}

fn statvfs_usage(path: &str, base: ByteBase) -> Result<DiskUsage> {
    use nix::sys::statvfs::statvfs;
    let stat = statvfs(path).with_context(|| format!("statvfs {}", path))?;

    let frsize = stat.fragment_size() as u64;
    let total_bytes = (stat.blocks() as u64).saturating_mul(frsize);
    // Space available to unprivileged users; reserved blocks count as used.
    let avail_bytes = (stat.blocks_available() as u64).saturating_mul(frsize);

    Ok(DiskUsage::from_bytes(total_bytes, avail_bytes, base))
}
