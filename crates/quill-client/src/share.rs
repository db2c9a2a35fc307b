use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SharePlatform {
    Facebook,
    Twitter,
    LinkedIn,
    Copy,
}

impl SharePlatform {
    pub const ALL: [SharePlatform; 4] = [
        SharePlatform::Facebook,
        SharePlatform::Twitter,
        SharePlatform::LinkedIn,
        SharePlatform::Copy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SharePlatform::Facebook => "Facebook",
            SharePlatform::Twitter => "Twitter",
            SharePlatform::LinkedIn => "LinkedIn",
            SharePlatform::Copy => "Copy Link",
        }
    }
}

/// Intent URL for sharing `pageUrl` on `platform`.
pub fn share_url(platform: SharePlatform, pageUrl: &str, title: &str) -> String {
    let encodedUrl = percent_encode(pageUrl);
    match platform {
        SharePlatform::Facebook => {
            format!("https://www.facebook.com/sharer/sharer.php?u={encodedUrl}")
        }
        SharePlatform::Twitter => format!(
            "https://twitter.com/intent/tweet?url={encodedUrl}&text={}",
            percent_encode(title)
        ),
        SharePlatform::LinkedIn => {
            format!("https://www.linkedin.com/sharing/share-offsite/?url={encodedUrl}")
        }
        SharePlatform::Copy => pageUrl.to_string(),
    }
}

/// Same character set as `encodeURIComponent`.
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twitter_link_encodes_url_and_title() {
        let link = share_url(
            SharePlatform::Twitter,
            "https://blog.example.com/post/5",
            "XSS & you",
        );
        assert_eq!(
            link,
            "https://twitter.com/intent/tweet?url=https%3A%2F%2Fblog.example.com%2Fpost%2F5&text=XSS%20%26%20you"
        );
    }

    #[test]
    fn copy_returns_page_url() {
        assert_eq!(share_url(SharePlatform::Copy, "https://x/post/1", "t"), "https://x/post/1");
    }

    #[test]
    fn non_ascii_is_utf8_encoded() {
        assert_eq!(percent_encode("ş"), "%C5%9F");
    }
}
