use chrono::{DateTime, Utc};
use maud::{html, Markup};

use crate::db::{entities::genre, repositories::ShowListing};

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x300/1a1a1a/ffffff?text=Fyyur";

/// One-shot message shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

pub fn notice_banner(notice: &Notice) -> Markup {
    let (class, text) = match notice {
        Notice::Success(text) => ("notice bg-green-100 text-green-800", text),
        Notice::Error(text) => ("notice bg-red-100 text-red-800", text),
    };

    html! {
        div class=(class) role="alert" { (text) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `Saturday June, 15, 2019 at 8:00PM`
    Full,
    /// `Sat 06, 15, 2019 8:00PM`
    Medium,
}

pub fn format_datetime(value: DateTime<Utc>, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
        DateFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
    };
    value.format(pattern).to_string()
}

pub fn genre_tags(genres: &[genre::Model]) -> Markup {
    html! {
        div class="flex flex-wrap gap-2" {
            @for genre in genres {
                span class="genre-tag" { (genre.name) }
            }
        }
    }
}

/// Which side of a show the card links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowCounterpart {
    Artist,
    Venue,
}

pub fn show_cards(heading: &str, shows: &[ShowListing], counterpart: ShowCounterpart) -> Markup {
    html! {
        section class="mt-8" {
            h2 class="text-2xl font-bold text-gray-900 mb-4" {
                (shows.len()) " " (heading)
            }
            div class="grid grid-cols-1 md:grid-cols-3 gap-6" {
                @for show in shows {
                    (show_card(show, counterpart))
                }
            }
        }
    }
}

fn show_card(show: &ShowListing, counterpart: ShowCounterpart) -> Markup {
    let (href, name, image) = match counterpart {
        ShowCounterpart::Artist => (
            format!("/artists/{}", show.artist_id),
            &show.artist_name,
            show.artist_image_link.as_deref(),
        ),
        ShowCounterpart::Venue => (
            format!("/venues/{}", show.venue_id),
            &show.venue_name,
            show.venue_image_link.as_deref(),
        ),
    };

    html! {
        div class="show-card bg-white rounded-lg shadow-md overflow-hidden" {
            img src=(image.unwrap_or(PLACEHOLDER_IMAGE)) alt=(name) class="w-full h-40 object-cover" loading="lazy";
            div class="p-4" {
                a href=(href) class="font-semibold text-gray-900" { (name) }
                p class="text-sm text-gray-600" {
                    (format_datetime(show.start_time, DateFormat::Full))
                }
            }
        }
    }
}

pub fn search_box(action: &str, placeholder: &str, term: &str) -> Markup {
    html! {
        form method="post" action=(action) class="search-box mb-6" {
            input
                type="search"
                name="search_term"
                value=(term)
                placeholder=(placeholder)
                aria-label=(placeholder)
                class="w-full px-3 py-2 border border-gray-300 rounded-md";
        }
    }
}

pub fn text_field(name: &str, label: &str, value: Option<&str>, required: bool) -> Markup {
    html! {
        div class="form-group" {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-2" { (label) }
            input
                type="text"
                id=(name)
                name=(name)
                value=[value]
                required[required]
                class="w-full px-3 py-2 border border-gray-300 rounded-md";
        }
    }
}

pub fn checkbox_field(name: &str, label: &str, checked: bool) -> Markup {
    html! {
        div class="form-group" {
            label class="inline-flex items-center space-x-2" {
                input type="checkbox" name=(name) value="y" checked[checked];
                span { (label) }
            }
        }
    }
}

pub fn genre_select(catalog: &[genre::Model], selected: &[String]) -> Markup {
    html! {
        div class="form-group" {
            label for="genres" class="block text-sm font-medium text-gray-700 mb-2" { "Genres" }
            select id="genres" name="genres" multiple class="w-full px-3 py-2 border border-gray-300 rounded-md" {
                @for genre in catalog {
                    option value=(genre.name) selected[selected.contains(&genre.name)] {
                        (genre.name)
                    }
                }
            }
        }
    }
}

/// Button issuing `DELETE` through HTMX; the server answers with an `HX-Redirect`.
pub fn delete_button(url: &str, label: &str) -> Markup {
    html! {
        button
            class="px-4 py-2 bg-red-500 hover:bg-red-600 text-white font-semibold rounded-md"
            hx-delete=(url)
            hx-confirm="This also removes every show listed for it. Continue?"
            hx-swap="none" {
            (label)
        }
    }
}

pub fn detail_header(
    name: &str,
    id: i32,
    image_link: Option<&str>,
    genres: &[genre::Model],
    location: Option<String>,
) -> Markup {
    html! {
        div class="flex flex-col md:flex-row gap-6" {
            img src=(image_link.unwrap_or(PLACEHOLDER_IMAGE)) alt=(name) class="w-full md:w-64 rounded-lg shadow-md";
            div class="flex-grow" {
                h1 class="text-3xl font-bold text-gray-900" { (name) }
                p class="text-sm text-gray-500" { "ID: " (id) }
                (genre_tags(genres))
                @if let Some(location) = location {
                    p class="mt-2 text-gray-700" { (location) }
                }
            }
        }
    }
}

pub fn location_line(city: Option<&str>, state: Option<&str>) -> Option<String> {
    match (city, state) {
        (Some(city), Some(state)) => Some(format!("{}, {}", city, state)),
        (Some(one), None) | (None, Some(one)) => Some(one.to_string()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_full_dates() {
        let value = Utc.with_ymd_and_hms(2019, 6, 15, 20, 0, 0).unwrap();
        assert_eq!(format_datetime(value, DateFormat::Full), "Saturday June, 15, 2019 at 8:00PM");
    }

    #[test]
    fn formats_medium_dates() {
        let value = Utc.with_ymd_and_hms(2019, 6, 5, 9, 30, 0).unwrap();
        assert_eq!(format_datetime(value, DateFormat::Medium), "Wed 06, 05, 2019 9:30AM");
    }

    #[test]
    fn location_skips_missing_parts() {
        assert_eq!(location_line(Some("Austin"), Some("TX")).as_deref(), Some("Austin, TX"));
        assert_eq!(location_line(None, Some("TX")).as_deref(), Some("TX"));
        assert_eq!(location_line(None, None), None);
    }

    #[test]
    fn notice_text_is_escaped() {
        let markup = notice_banner(&Notice::Error("<b>bad</b>".to_string())).into_string();
        assert!(markup.contains("&lt;b&gt;bad&lt;/b&gt;"));
    }
}
