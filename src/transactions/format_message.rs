use crate::{context::Repository, workflow::artifact::Artifact};

/// The substring marking an artifact as a Windows build.
pub const WINDOWS_MARKER: &str = "w64";

/// Formats the comment linking to the artifacts through a download mirror.
///
/// Artifacts whose name contains [`WINDOWS_MARKER`] are listed in a collapsed `Windows` section,
/// which is present even when empty; every other artifact is listed at the top. Both lists keep the
/// order of `artifacts`. Names are not escaped.
pub fn format_message(mirror: &str, repository: &Repository, artifacts: &[Artifact]) -> String {
    let (windows, others): (Vec<&Artifact>, Vec<&Artifact>) = artifacts
        .iter()
        .partition(|artifact| artifact.name.contains(WINDOWS_MARKER));

    let mut body = String::from("Download the artifacts for this pull request:\n");
    for artifact in others {
        body.push_str(&link(mirror, repository, artifact));
    }

    body.push_str("\n\n <details><summary>Windows</summary>\n");
    for artifact in windows {
        body.push_str(&link(mirror, repository, artifact));
    }
    body.push_str("\n</details>");

    body
}

/// The URL the mirror serves an artifact at.
pub fn artifact_url(mirror: &str, repository: &Repository, artifact: &Artifact) -> String {
    format!(
        "{mirror}/{}/{}/actions/artifacts/{}.zip",
        repository.owner, repository.name, artifact.id
    )
}

fn link(mirror: &str, repository: &Repository, artifact: &Artifact) -> String {
    format!(
        "\n* [{}]({})",
        artifact.name,
        artifact_url(mirror, repository, artifact)
    )
}
