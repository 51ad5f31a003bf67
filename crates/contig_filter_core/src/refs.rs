/// Fully resolved reference to one object version: `{workspace_id}/{object_id}/{version}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionedRef {
    pub workspace_id: u64,
    pub object_id: u64,
    pub version: u64,
}

impl std::fmt::Display for VersionedRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let VersionedRef {
            workspace_id,
            object_id,
            version,
        } = self;
        write!(f, "{workspace_id}/{object_id}/{version}")
    }
}

/// Name-based reference resolving to the latest version of an object.
pub fn object_ref(workspace: &str, object_name: &str) -> String {
    format!("{workspace}/{object_name}")
}

pub fn versioned_object_ref(workspace_id: u64, object_id: u64, version: u64) -> String {
    VersionedRef {
        workspace_id,
        object_id,
        version,
    }
    .to_string()
}

pub fn parse_versioned_ref(reference: &str) -> Option<VersionedRef> {
    let mut parts = reference.trim().split('/');
    let workspace_id = parts.next()?.parse().ok()?;
    let object_id = parts.next()?.parse().ok()?;
    let version = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    Some(VersionedRef {
        workspace_id,
        object_id,
        version,
    })
}
