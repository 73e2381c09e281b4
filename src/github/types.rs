use serde::Deserialize;

/// Represents a GitHub release asset
#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// A full release as returned by the by-tag endpoint. `assets` is required.
#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct Release {
    pub tag_name: String,
    pub assets: Vec<ReleaseAsset>,
}

/// One entry of the release listing; only the tag is read.
#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct ReleaseTag {
    pub tag_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_listing_minimal_body() {
        let releases: Vec<ReleaseTag> =
            serde_json::from_str(r#"[{"tag_name":"v1"},{"tag_name":"v2"}]"#).unwrap();

        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].tag_name, "v1");
        assert_eq!(releases[1].tag_name, "v2");
    }

    #[test]
    fn test_release_listing_missing_tag_name_is_rejected() {
        let result = serde_json::from_str::<Vec<ReleaseTag>>(r#"[{"name":"untagged"}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_release_missing_tag_name_is_rejected() {
        let result = serde_json::from_str::<Release>(r#"{"name":"untagged","assets":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_release_missing_assets_is_rejected() {
        let result = serde_json::from_str::<Release>(r#"{"tag_name":"v1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_asset_missing_download_url_is_rejected() {
        let result = serde_json::from_str::<Release>(
            r#"{"tag_name":"v1","assets":[{"name":"paperless-ngx-v1.tar.xz"}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_release_full_body_ignores_unknown_fields() {
        let release: Release = serde_json::from_str(
            r#"{
                "tag_name": "v2.7.2",
                "name": "Paperless-ngx v2.7.2",
                "published_at": "2024-04-20T14:38:54Z",
                "prerelease": false,
                "assets": [
                    {
                        "name": "paperless-ngx-v2.7.2.tar.xz",
                        "size": 123456,
                        "browser_download_url": "https://github.com/paperless-ngx/paperless-ngx/releases/download/v2.7.2/paperless-ngx-v2.7.2.tar.xz"
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(release.tag_name, "v2.7.2");
        assert_eq!(release.assets.len(), 1);
        assert!(release.assets[0].browser_download_url.ends_with(".tar.xz"));
    }
}
