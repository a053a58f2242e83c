use anyhow::{Context, Result};
use log::warn;

/// Pseudo and virtual filesystems that are never worth plotting.
const SKIP_FS: &[&str] = &[
    "proc", "sysfs", "devpts", "tmpfs", "devtmpfs", "cgroup", "cgroup2",
    "pstore", "efivarfs", "securityfs", "debugfs", "tracefs", "bpf",
    "hugetlbfs", "mqueue", "fusectl", "configfs", "binfmt_misc",
    "overlay", "nsfs", "rpc_pipefs", "autofs", "squashfs",
];

const SKIP_MOUNT_PREFIX: &[&str] = &[
    "/proc", "/sys", "/dev", "/run/user", "/snap",
];

/// Mount points selectable as the monitored volume. `/` always comes first.
pub fn list_mounts() -> Vec<String> {
    match read_proc_mounts() {
        Ok(content) => parse_mounts(&content),
        Err(e) => {
            warn!("mount table unavailable: {:#}", e);
            vec!["/".to_string()]
        }
    }
}

fn read_proc_mounts() -> Result<String> {
    std::fs::read_to_string("/proc/mounts").context("read /proc/mounts")
}

pub fn parse_mounts(content: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 { continue; }
        let (device, mount, fs_type) = (fields[0], unescape(fields[1]), fields[2]);

        if SKIP_FS.contains(&fs_type) { continue; }
        if SKIP_MOUNT_PREFIX.iter().any(|p| mount.starts_with(p)) { continue; }
        // Skip loop-mounted snaps
        if device.starts_with("/dev/loop") { continue; }
        if mount == "/" || out.contains(&mount) { continue; }
        out.push(mount);
    }
    out.sort();
    out.insert(0, "/".to_string());
    out
}

/// /proc/mounts encodes space, tab, newline and backslash as `\ooo` octal.
fn unescape(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 4 <= bytes.len() {
            let code = std::str::from_utf8(&bytes[i + 1..i + 4])
                .ok()
                .filter(|s| s.bytes().all(|b| (b'0'..=b'7').contains(&b)))
                .and_then(|s| u8::from_str_radix(s, 8).ok());
            if let Some(v) = code {
                out.push(v);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOUNTS: &str = "\
sysfs /sys sysfs rw,nosuid 0 0
proc /proc proc rw 0 0
/dev/nvme0n1p2 / ext4 rw,relatime 0 0
/dev/nvme0n1p1 /boot/efi vfat rw 0 0
tmpfs /run tmpfs rw 0 0
/dev/loop3 /snap/core/1 squashfs ro 0 0
/dev/sdb1 /mnt/My\\040Data ext4 rw 0 0
/dev/sda1 /home ext4 rw 0 0
overlay /var/lib/docker/overlay2/x/merged overlay rw 0 0
/dev/sda1 /home ext4 rw 0 0
";

    #[test]
    fn keeps_real_filesystems_with_root_first() {
        assert_eq!(
            parse_mounts(MOUNTS),
            vec!["/", "/boot/efi", "/home", "/mnt/My Data"]
        );
    }

    #[test]
    fn root_is_present_even_without_entry() {
        assert_eq!(parse_mounts(""), vec!["/"]);
    }

    #[test]
    fn unescapes_octal_sequences() {
        assert_eq!(unescape("/a\\040b\\011c"), "/a b\tc");
        assert_eq!(unescape("/plain"), "/plain");
        assert_eq!(unescape("/trailing\\04"), "/trailing\\04");
    }
}
