use crate::models::units::ByteBase;
use crate::models::usage::DockerUsage;
use anyhow::{bail, Context, Result};
use log::{debug, warn};
use std::process::Command;

/// The two container-runtime queries the sampler needs.
pub trait ContainerRuntime {
    /// Names of running containers, one per line.
    fn list_names(&self) -> Result<String>;
    /// Raw `df -k /` output from inside `container`.
    fn disk_report(&self, container: &str) -> Result<String>;
}

/// Shells out to the `docker` CLI (or a compatible binary such as `podman`).
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
}

impl DockerCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let out = Command::new(&self.binary)
            .args(args)
            .output()
            .with_context(|| format!("{} not found", self.binary))?;
        if !out.status.success() {
            bail!(
                "{} {} exited with {}: {}",
                self.binary,
                args.join(" "),
                out.status,
                String::from_utf8_lossy(&out.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

impl ContainerRuntime for DockerCli {
    fn list_names(&self) -> Result<String> {
        self.run(&["ps", "--format", "{{.Names}}"])
    }

    fn disk_report(&self, container: &str) -> Result<String> {
        self.run(&["exec", container, "df", "-k", "/"])
    }
}

/// Container names containing `filter`, case-insensitively, in listing order.
pub fn match_containers(listing: &str, filter: &str) -> Vec<String> {
    let needle = filter.to_lowercase();
    listing.lines()
        .map(str::trim)
        .filter(|name| !name.is_empty() && name.to_lowercase().contains(&needle))
        .map(str::to_string)
        .collect()
}

/// Running containers matching `filter`; empty on any runtime error.
pub fn list_matching(runtime: &dyn ContainerRuntime, filter: &str) -> Vec<String> {
    match runtime.list_names() {
        Ok(listing) => match_containers(&listing, filter),
        Err(e) => {
            warn!("container listing failed: {:#}", e);
            Vec::new()
        }
    }
}

/// The container to sample: an exact name match wins, otherwise the first
/// substring match.
pub fn find_container(runtime: &dyn ContainerRuntime, filter: &str) -> Option<String> {
    resolve(&list_matching(runtime, filter), filter).cloned()
}

/// Which of `names` a poller given `target` samples, by the same rule as
/// [`find_container`].
pub fn resolve<'a>(names: &'a [String], target: &str) -> Option<&'a String> {
    let needle = target.to_lowercase();
    names.iter()
        .find(|n| n.as_str() == target)
        .or_else(|| names.iter().find(|n| n.to_lowercase().contains(&needle)))
}

/// Parse `df -k` output: after the header, field 2 is total KB and field 3 is
/// used KB. Lines are joined first because df wraps long device names.
pub fn parse_df(output: &str, base: ByteBase) -> Option<DockerUsage> {
    let body: Vec<&str> = output.lines()
        .skip(1)
        .flat_map(str::split_whitespace)
        .collect();
    if body.len() < 4 { return None; }

    let total_kb: f64 = body[1].parse().ok()?;
    let used_kb:  f64 = body[2].parse().ok()?;
    if !total_kb.is_finite() || !used_kb.is_finite() || total_kb < 0.0 || used_kb < 0.0 {
        return None;
    }

    Some(DockerUsage {
        total_gb: base.gb_from_kb(total_kb),
        used_gb:  base.gb_from_kb(used_kb),
    })
}

/// Root filesystem usage inside `container`; `None` on any failure.
pub fn read_docker_usage(
    runtime: &dyn ContainerRuntime,
    container: &str,
    base: ByteBase,
) -> Option<DockerUsage> {
    let report = match runtime.disk_report(container) {
        Ok(r)  => r,
        Err(e) => {
            warn!("df in container {} failed: {:#}", container, e);
            return None;
        }
    };
    let usage = parse_df(&report, base);
    if usage.is_none() {
        warn!("unrecognised df output from {}: {:?}", container, report.trim());
    }
    usage
}

/// Locate the container matching `filter` and read its usage.
pub fn sample(runtime: &dyn ContainerRuntime, filter: &str, base: ByteBase) -> Option<DockerUsage> {
    let Some(name) = find_container(runtime, filter) else {
        debug!("no running container matches {:?}", filter);
        return None;
    };
    read_docker_usage(runtime, &name, base)
}
