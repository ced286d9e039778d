//! Output renderers
//!
//! `html` requests get the render payload as JSON for the template layer,
//! `xml` gets a `<response>` document and `atom` an Atom feed. All three
//! keep the order the services produced.

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::types::kudo::{AccountResponse, KudoListResponse, KudoResponse};
use crate::api::types::project::{
    ProjectListResponse, ProjectResponse, SimilarProjectResponse, SimilarProjectsResponse,
};
use crate::api::types::ApiError;
use crate::domain::access::ResponseFormat;
use crate::domain::project::{Page, ProjectSummary};
use crate::infrastructure::kudo::KudoListing;
use crate::infrastructure::project::SimilarProjects;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";
const ATOM_CONTENT_TYPE: &str = "application/atom+xml; charset=utf-8";
const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";
const URN_PREFIX: &str = "urn:project-directory";

#[derive(Serialize)]
struct XmlProjectList<'a> {
    status: &'static str,
    items_returned: usize,
    items_available: usize,
    first_item_position: usize,
    result: XmlProjects<'a>,
}

#[derive(Serialize)]
struct XmlProjects<'a> {
    #[serde(rename = "project")]
    projects: &'a [ProjectResponse],
}

#[derive(Serialize)]
struct XmlSimilarProjects<'a> {
    status: &'static str,
    project: &'a ProjectResponse,
    by_tags: XmlSimilarList<'a>,
    by_stacks: XmlSimilarList<'a>,
}

#[derive(Serialize)]
struct XmlSimilarList<'a> {
    #[serde(rename = "similar_project")]
    items: &'a [SimilarProjectResponse],
}

#[derive(Serialize)]
struct XmlKudoList<'a> {
    status: &'static str,
    items_returned: usize,
    account: &'a AccountResponse,
    kudos: XmlKudos<'a>,
}

#[derive(Serialize)]
struct XmlKudos<'a> {
    #[serde(rename = "kudo")]
    items: &'a [KudoResponse],
}

#[derive(Serialize)]
struct AtomFeed {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    title: String,
    id: String,
    updated: String,
    #[serde(rename = "entry")]
    entries: Vec<AtomEntry>,
}

#[derive(Serialize)]
struct AtomEntry {
    title: String,
    id: String,
    updated: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
}

impl AtomFeed {
    fn new(title: impl Into<String>, id: impl Into<String>, entries: Vec<(AtomEntry, DateTime<Utc>)>) -> Self {
        let updated = entries
            .iter()
            .map(|(_, at)| *at)
            .max()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Self {
            xmlns: ATOM_NAMESPACE,
            title: title.into(),
            id: id.into(),
            updated: updated.to_rfc3339(),
            entries: entries.into_iter().map(|(entry, _)| entry).collect(),
        }
    }
}

fn project_entry(project: &ProjectSummary) -> (AtomEntry, DateTime<Utc>) {
    let entry = AtomEntry {
        title: project.name().to_string(),
        id: format!("{}:project:{}", URN_PREFIX, project.id()),
        updated: project.created_at().to_rfc3339(),
        summary: project.description().map(str::to_string),
    };
    (entry, project.created_at())
}

/// Render one page of a project listing
pub fn projects(format: ResponseFormat, page: &Page<ProjectSummary>) -> Result<Response, ApiError> {
    match format {
        ResponseFormat::Html => Ok(Json(ProjectListResponse::from(page)).into_response()),
        ResponseFormat::Xml => {
            let body = ProjectListResponse::from(page);
            let document = XmlProjectList {
                status: body.status,
                items_returned: body.items_returned,
                items_available: body.items_available,
                first_item_position: body.first_item_position,
                result: XmlProjects {
                    projects: &body.projects,
                },
            };
            xml(&document, "response", XML_CONTENT_TYPE)
        }
        ResponseFormat::Atom => {
            let feed = AtomFeed::new(
                "Projects",
                format!("{}:projects", URN_PREFIX),
                page.items.iter().map(project_entry).collect(),
            );
            xml(&feed, "feed", ATOM_CONTENT_TYPE)
        }
    }
}

/// Render similar-project suggestions
///
/// The Atom feed lists tag matches before stack matches; a project that
/// appears in both lists appears twice.
pub fn similar_projects(
    format: ResponseFormat,
    similar: &SimilarProjects,
) -> Result<Response, ApiError> {
    match format {
        ResponseFormat::Html => Ok(Json(SimilarProjectsResponse::from(similar)).into_response()),
        ResponseFormat::Xml => {
            let body = SimilarProjectsResponse::from(similar);
            let document = XmlSimilarProjects {
                status: body.status,
                project: &body.project,
                by_tags: XmlSimilarList {
                    items: &body.by_tags,
                },
                by_stacks: XmlSimilarList {
                    items: &body.by_stacks,
                },
            };
            xml(&document, "response", XML_CONTENT_TYPE)
        }
        ResponseFormat::Atom => {
            let entries = similar
                .by_tags
                .iter()
                .chain(similar.by_stacks.iter())
                .map(|s| project_entry(&s.project))
                .collect();
            let feed = AtomFeed::new(
                format!("Projects similar to {}", similar.project.name()),
                format!("{}:project:{}:similar", URN_PREFIX, similar.project.id()),
                entries,
            );
            xml(&feed, "feed", ATOM_CONTENT_TYPE)
        }
    }
}

/// Render a kudo listing; `title` names the feed
pub fn kudos(
    format: ResponseFormat,
    listing: &KudoListing,
    title: &str,
) -> Result<Response, ApiError> {
    match format {
        ResponseFormat::Html => Ok(Json(KudoListResponse::from(listing)).into_response()),
        ResponseFormat::Xml => {
            let body = KudoListResponse::from(listing);
            let document = XmlKudoList {
                status: body.status,
                items_returned: body.items_returned,
                account: &body.account,
                kudos: XmlKudos { items: &body.kudos },
            };
            xml(&document, "response", XML_CONTENT_TYPE)
        }
        ResponseFormat::Atom => {
            let entries = listing
                .kudos
                .iter()
                .map(|kudo| {
                    let response = KudoResponse::from(kudo);
                    let entry = AtomEntry {
                        title: response.title(),
                        id: format!("{}:kudo:{}", URN_PREFIX, response.id),
                        updated: response.created_at.clone(),
                        summary: response.message,
                    };
                    (entry, kudo.created_at())
                })
                .collect();
            let feed = AtomFeed::new(
                title,
                format!("{}:account:{}:kudos", URN_PREFIX, listing.account.id()),
                entries,
            );
            xml(&feed, "feed", ATOM_CONTENT_TYPE)
        }
    }
}

fn xml<T: Serialize>(value: &T, root: &str, content_type: &'static str) -> Result<Response, ApiError> {
    let body = to_xml(value, root)?;
    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

fn to_xml<T: Serialize>(value: &T, root: &str) -> Result<String, ApiError> {
    let document = quick_xml::se::to_string_with_root(root, value).map_err(|e| {
        tracing::error!(error = %e, root = root, "Failed to serialize XML");
        ApiError::internal("Failed to render XML")
    })?;

    Ok(format!("{}\n{}", XML_DECLARATION, document))
}
