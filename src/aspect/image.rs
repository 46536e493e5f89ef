// SPDX-License-Identifier: MPL-2.0
//! Image detail presentation.

use super::blob::REFERENCE_PARAM;
use crate::domain::{ContentReference, PermanodeMetadata, ResolvedMetadata};
use crate::ui::detail::ViewInputs;
use iced::Size;
use reqwest::Url;

/// Everything the image aspect needs besides the allotted size.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAspectInputs {
    pub resolved: ResolvedMetadata,
    pub permanode: Option<PermanodeMetadata>,
    /// Target of the "back to search" link.
    pub search_url: Url,
    /// Legacy (editable) interface for this reference.
    pub legacy_url: Url,
    /// Walk the placeholder right-to-left.
    pub backward_placeholder: bool,
}

#[derive(Debug, Clone)]
pub struct ImageAspect {
    inputs: ImageAspectInputs,
}

impl ImageAspect {
    #[must_use]
    pub fn new(inputs: ImageAspectInputs) -> Self {
        Self { inputs }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        "Image"
    }

    #[must_use]
    pub fn reference(&self) -> &ContentReference {
        &self.inputs.resolved.blob_ref
    }

    #[must_use]
    pub fn inputs(&self) -> &ImageAspectInputs {
        &self.inputs
    }

    #[must_use]
    pub fn content(&self, size: Size) -> ViewInputs {
        ViewInputs {
            size,
            resolved: self.inputs.resolved.clone(),
            permanode: self.inputs.permanode.clone(),
            search_url: self.inputs.search_url.clone(),
            legacy_url: self.inputs.legacy_url.clone(),
            backward_placeholder: self.inputs.backward_placeholder,
        }
    }
}

/// The legacy interface URL for `reference`: `legacy_base` with `b=<ref>`.
#[must_use]
pub fn legacy_url_for(legacy_base: &Url, reference: &ContentReference) -> Url {
    let mut url = legacy_base.clone();
    let kept: Vec<(String, String)> = legacy_base
        .query_pairs()
        .filter(|(name, _)| name != REFERENCE_PARAM)
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    url.set_query(None);
    {
        let mut query = url.query_pairs_mut();
        for (name, value) in &kept {
            query.append_pair(name, value);
        }
        query.append_pair(REFERENCE_PARAM, reference.as_str());
    }
    url
}
