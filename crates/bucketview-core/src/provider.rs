//! Cloud provider inference.
//!
//! The dashboard labels each account with the provider behind its endpoint.
//! There is no discovery API for this; the label comes from the configured
//! endpoint host through an ordered lookup table with a default branch:
//! no endpoint override means plain AWS, a known host maps to its provider,
//! and any other self-hosted endpoint is assumed to be Garage.

use url::Url;

/// Known endpoint hosts, first match wins.
const PROVIDER_HOSTS: &[(&str, &str)] = &[
    ("s3.fr-par.scw.cloud", "Scaleway"),
    ("s3.eu-west-3.amazonaws.com", "AWS"),
];

const NO_ENDPOINT_PROVIDER: &str = "AWS";
const SELF_HOSTED_PROVIDER: &str = "Garage";

/// Infer the provider label for a configured endpoint.
///
/// Total over its input; `None` is returned only when an endpoint is present
/// but unparseable, mirroring the "inference failed" default of the
/// aggregation pass.
pub fn infer_provider_name(endpoint: Option<&str>) -> Option<&'static str> {
    match endpoint {
        None => Some(NO_ENDPOINT_PROVIDER),
        Some(raw) => {
            let url = Url::parse(raw).ok()?;
            let host = url.host_str()?;
            Some(
                PROVIDER_HOSTS
                    .iter()
                    .find(|(known, _)| *known == host)
                    .map(|(_, name)| *name)
                    .unwrap_or(SELF_HOSTED_PROVIDER),
            )
        }
    }
}

/// Logo displayed next to a provider label; empty for unknown providers.
pub fn provider_logo_url(name: Option<&str>) -> &'static str {
    match name {
        Some("Scaleway") => {
            "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcRqN9RIEUF8A45dNLGl3nbRgbvIUOhNOQOyfQ&s"
        }
        Some("AWS") => {
            "https://upload.wikimedia.org/wikipedia/commons/9/93/Amazon_Web_Services_Logo.svg"
        }
        Some("Garage") => "https://garagehq.deuxfleurs.fr/images/garage-logo.svg",
        _ => "",
    }
}
