use yew::prelude::*;

use crate::integrations::gate::{use_integrations, Capability};

const CLOUDINARY_BASE: &str = "https://res.cloudinary.com";

fn transformation(width: Option<u32>) -> String {
    match width {
        Some(w) if w > 0 => format!("f_auto,q_auto,w_{}", w),
        _ => "f_auto,q_auto".to_string(),
    }
}

/// Delivery URL for `src`. Absolute sources go through Cloudinary's fetch
/// mode, site-relative ones are treated as uploaded public ids. Without a
/// cloud name the source is returned untouched.
pub fn cdn_image_url(cdn: &Capability, src: &str, width: Option<u32>) -> String {
    let Some(cloud) = cdn.value() else {
        return src.to_string();
    };
    if src.is_empty() || src.starts_with("data:") {
        return src.to_string();
    }

    let transform = transformation(width);
    if src.starts_with("http://") || src.starts_with("https://") {
        format!(
            "{}/{}/image/fetch/{}/{}",
            CLOUDINARY_BASE,
            cloud,
            transform,
            urlencoding::encode(src)
        )
    } else {
        format!(
            "{}/{}/image/upload/{}/{}",
            CLOUDINARY_BASE,
            cloud,
            transform,
            src.trim_start_matches('/')
        )
    }
}

#[derive(Properties, PartialEq)]
pub struct CdnImageProps {
    pub src: AttrValue,
    pub alt: AttrValue,
    #[prop_or_default]
    pub width: Option<u32>,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(CdnImage)]
pub fn cdn_image(props: &CdnImageProps) -> Html {
    let integrations = use_integrations();
    let cdn = integrations
        .map(|i| i.image_cdn.clone())
        .unwrap_or(Capability::Inactive);
    let src = cdn_image_url(&cdn, &props.src, props.width);

    html! {
        <img
            src={src}
            alt={props.alt.clone()}
            width={props.width.map(|w| w.to_string())}
            loading="lazy"
            class={props.class.clone()}
        />
    }
}
