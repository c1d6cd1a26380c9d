//! Farcaster Frame protocol boundary.
//!
//! Cast-action payloads, inbound Frame message parsing and hosting-page
//! metadata assembly. Signature verification of Frame messages is an
//! external-protocol concern hidden behind [`FrameMessageVerifier`]; this
//! module only consumes the parsed result and never reimplements the
//! Frame wire protocol.

use serde::{Deserialize, Serialize};
use url::Url;

use moxie_common::error::AppError;

/// Display name of the cast action and the hosting page.
pub const FRAME_NAME: &str = "Moxie Stats Frame";

/// Shared description used by the action descriptor and page metadata.
pub const FRAME_DESCRIPTION: &str =
    "Use this frame to retrieve your Moxie Stats and Engagement Scores";

/// Static cast-action descriptor served on discovery (`GET`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastActionDescriptor {
    pub name: String,
    pub icon: String,
    pub description: String,
    #[serde(rename = "aboutUrl")]
    pub about_url: String,
    pub action: CastActionType,
}

/// The action's protocol type — always a `post` action for this app.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastActionType {
    #[serde(rename = "type")]
    pub action_type: String,
}

/// Build the discovery descriptor advertising this app's cast action.
pub fn cast_action_descriptor(app_url: &str) -> CastActionDescriptor {
    CastActionDescriptor {
        name: FRAME_NAME.to_string(),
        icon: "pulse".to_string(),
        description: FRAME_DESCRIPTION.to_string(),
        about_url: app_url.to_string(),
        action: CastActionType {
            action_type: "post".to_string(),
        },
    }
}

/// Cast-action invocation response directing the client to render a frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastActionFrameResponse {
    #[serde(rename = "type")]
    pub response_type: String,
    #[serde(rename = "frameUrl")]
    pub frame_url: String,
}

/// Build a `frame`-type action response pointing at `target_url`.
pub fn cast_action_frame(target_url: &str) -> CastActionFrameResponse {
    CastActionFrameResponse {
        response_type: "frame".to_string(),
        frame_url: target_url.to_string(),
    }
}

/// The parts of a verified Frame message this app consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameMessage {
    /// fid of the author of the cast the action was invoked on.
    pub cast_author_fid: Option<u64>,
}

/// Verifies and parses an inbound signed Frame message.
///
/// The production implementation delegates trust in the message to the
/// Farcaster protocol layer; tests substitute their own.
pub trait FrameMessageVerifier: Send + Sync {
    fn verify_and_parse(&self, body: &[u8]) -> Result<FrameMessage, AppError>;
}

/// Standard Frame action POST envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrameActionBody {
    untrusted_data: Option<UntrustedData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UntrustedData {
    cast_id: Option<CastId>,
}

#[derive(Debug, Deserialize)]
struct CastId {
    fid: Option<u64>,
}

/// Parser for the standard Frame action envelope.
///
/// Extracts the cast author's fid from the message payload; cryptographic
/// verification of the signed message bytes belongs to the hosting
/// protocol infrastructure, not this service.
pub struct EnvelopeVerifier;

impl FrameMessageVerifier for EnvelopeVerifier {
    fn verify_and_parse(&self, body: &[u8]) -> Result<FrameMessage, AppError> {
        let parsed: FrameActionBody = serde_json::from_slice(body)
            .map_err(|e| AppError::Decode(format!("Malformed frame message: {}", e)))?;

        let cast_author_fid = parsed
            .untrusted_data
            .and_then(|data| data.cast_id)
            .and_then(|cast| cast.fid);

        Ok(FrameMessage { cast_author_fid })
    }
}

/// Metadata for the hosting page: title, description, Open Graph image and
/// the Frame tag set consulted by Farcaster clients.
#[derive(Debug, Clone)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub og_image: String,
    pub frames_url: String,
    pub cast_action_url: String,
}

impl PageMetadata {
    /// Assemble page metadata, personalizing the internal frames URL when a
    /// `userfid` is present so the rendered frame fetches that user's stats.
    ///
    /// The `userfid` value arrives from the request query string and is
    /// percent-encoded into the frames URL, so it can never carry markup or
    /// stray query separators into the rendered head.
    pub fn build(app_url: &str, userfid: Option<&str>) -> Result<Self, AppError> {
        let mut frames_url = Url::parse(app_url)
            .map_err(|e| AppError::Config(format!("Invalid app URL {}: {}", app_url, e)))?;
        frames_url.set_path("/frames");

        if let Some(fid) = userfid.filter(|fid| !fid.is_empty()) {
            frames_url
                .query_pairs_mut()
                .append_pair("userfid", fid)
                .append_pair("action", "fetch");
        }

        Ok(Self {
            title: FRAME_NAME.to_string(),
            description: FRAME_DESCRIPTION.to_string(),
            og_image: format!("{}/api/og", app_url),
            frames_url: frames_url.to_string(),
            cast_action_url: format!("{}/api/cast-action", app_url),
        })
    }

    /// Render the `<head>` tag block for the hosting page.
    pub fn to_head_html(&self) -> String {
        format!(
            concat!(
                "<title>{title}</title>\n",
                "<meta property=\"og:title\" content=\"{title}\" />\n",
                "<meta property=\"og:description\" content=\"{description}\" />\n",
                "<meta property=\"og:image\" content=\"{og_image}\" />\n",
                "<meta name=\"fc:frame\" content=\"vNext\" />\n",
                "<meta name=\"fc:frame:image\" content=\"{og_image}\" />\n",
                "<meta name=\"fc:frame:post_url\" content=\"{frames_url}\" />\n",
                "<meta name=\"fc:frame:cast_action:url\" content=\"{cast_action_url}\" />",
            ),
            title = self.title,
            description = self.description,
            og_image = self.og_image,
            frames_url = self.frames_url,
            cast_action_url = self.cast_action_url,
        )
    }
}
