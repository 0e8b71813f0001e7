use axum::http::StatusCode;
use maud::{html, Markup};

use super::components::{
    checkbox_field, delete_button, detail_header, format_datetime, genre_select, location_line,
    notice_banner, search_box, show_cards, text_field, DateFormat, Notice, ShowCounterpart,
};
use super::layout::base_layout;
use crate::{
    db::{
        entities::{artist, genre},
        repositories::ShowListing,
    },
    services::{Area, ArtistDetail, ArtistInput, SearchResults, VenueDetail, VenueInput},
};

pub fn home_page(notice: Option<&Notice>) -> Markup {
    base_layout(
        "Home",
        html! {
            @if let Some(notice) = notice {
                (notice_banner(notice))
            }

            div class="text-center py-12" {
                h1 class="text-4xl font-bold text-gray-900" { "Fyyur" }
                p class="text-gray-600 mt-2" { "Find venues and artists, and book shows between them." }
                div class="mt-8 flex justify-center space-x-4" {
                    a href="/venues/create" class="button" { "Post a venue" }
                    a href="/artists/create" class="button" { "Post an artist" }
                    a href="/shows/create" class="button" { "Post a show" }
                }
            }
        },
    )
}

pub fn venues_page(areas: &[Area]) -> Markup {
    base_layout(
        "Venues",
        html! {
            (search_box("/venues/search", "Find a venue", ""))

            @if areas.is_empty() {
                p class="text-gray-600" { "No venues listed yet." }
            }

            @for area in areas {
                section class="area mb-8" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        (location_line(area.city.as_deref(), area.state.as_deref()).unwrap_or_else(|| "Unknown location".to_string()))
                    }
                    ul class="mt-2 space-y-1" {
                        @for venue in &area.venues {
                            li {
                                a href=(format!("/venues/{}", venue.id)) { (venue.name) }
                                span class="text-sm text-gray-500" {
                                    " (" (venue.num_upcoming_shows) " upcoming)"
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn venue_detail_page(detail: &VenueDetail) -> Markup {
    let venue = &detail.venue;

    base_layout(
        &venue.name,
        html! {
            (detail_header(
                &venue.name,
                venue.id,
                venue.image_link.as_deref(),
                &detail.genres,
                location_line(venue.city.as_deref(), venue.state.as_deref()),
            ))

            dl class="mt-6 space-y-2" {
                @if let Some(address) = &venue.address {
                    dt { "Address" } dd { (address) }
                }
                @if let Some(phone) = &venue.phone {
                    dt { "Phone" } dd { (phone) }
                }
                @if let Some(website) = &venue.website {
                    dt { "Website" } dd { a href=(website) target="_blank" { (website) } }
                }
                @if let Some(facebook) = &venue.facebook_link {
                    dt { "Facebook" } dd { a href=(facebook) target="_blank" { (facebook) } }
                }
            }

            @if venue.seeking_talent {
                div class="seeking mt-4" {
                    p { "Currently seeking talent" }
                    @if let Some(description) = &venue.seeking_description {
                        p class="text-gray-600" { (description) }
                    }
                }
            } @else {
                p class="mt-4 text-gray-500" { "Not currently seeking talent" }
            }

            div class="mt-6 flex gap-3" {
                a href=(format!("/venues/{}/edit", venue.id)) class="button" { "Edit" }
                (delete_button(&format!("/venues/{}", venue.id), "Delete venue"))
            }

            (show_cards("Upcoming Shows", &detail.shows.upcoming, ShowCounterpart::Artist))
            (show_cards("Past Shows", &detail.shows.past, ShowCounterpart::Artist))
        },
    )
}

pub fn artists_page(artists: &[artist::Model]) -> Markup {
    base_layout(
        "Artists",
        html! {
            (search_box("/artists/search", "Find an artist", ""))

            @if artists.is_empty() {
                p class="text-gray-600" { "No artists listed yet." }
            }

            ul class="space-y-1" {
                @for artist in artists {
                    li {
                        a href=(format!("/artists/{}", artist.id)) { (artist.name) }
                    }
                }
            }
        },
    )
}

pub fn artist_detail_page(detail: &ArtistDetail) -> Markup {
    let artist = &detail.artist;

    base_layout(
        &artist.name,
        html! {
            (detail_header(
                &artist.name,
                artist.id,
                artist.image_link.as_deref(),
                &detail.genres,
                location_line(artist.city.as_deref(), artist.state.as_deref()),
            ))

            dl class="mt-6 space-y-2" {
                @if let Some(phone) = &artist.phone {
                    dt { "Phone" } dd { (phone) }
                }
                @if let Some(website) = &artist.website {
                    dt { "Website" } dd { a href=(website) target="_blank" { (website) } }
                }
                @if let Some(facebook) = &artist.facebook_link {
                    dt { "Facebook" } dd { a href=(facebook) target="_blank" { (facebook) } }
                }
            }

            @if artist.seeking_venue {
                div class="seeking mt-4" {
                    p { "Currently seeking performance venues" }
                    @if let Some(description) = &artist.seeking_description {
                        p class="text-gray-600" { (description) }
                    }
                }
            } @else {
                p class="mt-4 text-gray-500" { "Not currently seeking performance venues" }
            }

            div class="mt-6 flex gap-3" {
                a href=(format!("/artists/{}/edit", artist.id)) class="button" { "Edit" }
                (delete_button(&format!("/artists/{}", artist.id), "Delete artist"))
            }

            (show_cards("Upcoming Shows", &detail.shows.upcoming, ShowCounterpart::Venue))
            (show_cards("Past Shows", &detail.shows.past, ShowCounterpart::Venue))
        },
    )
}

pub fn shows_page(shows: &[ShowListing]) -> Markup {
    base_layout(
        "Shows",
        html! {
            @if shows.is_empty() {
                p class="text-gray-600" { "No shows listed yet." }
            }

            div class="grid grid-cols-1 md:grid-cols-3 gap-6" {
                @for show in shows {
                    div class="show-card bg-white rounded-lg shadow-md p-4" {
                        @if let Some(image) = &show.artist_image_link {
                            img src=(image) alt=(show.artist_name) class="w-full h-40 object-cover" loading="lazy";
                        }
                        p class="text-sm text-gray-600" {
                            (format_datetime(show.start_time, DateFormat::Medium))
                        }
                        a href=(format!("/artists/{}", show.artist_id)) class="font-semibold" { (show.artist_name) }
                        " playing at "
                        a href=(format!("/venues/{}", show.venue_id)) { (show.venue_name) }
                    }
                }
            }
        },
    )
}

/// What a search results page lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Venues,
    Artists,
}

impl SearchKind {
    fn path(&self) -> &str {
        match self {
            Self::Venues => "venues",
            Self::Artists => "artists",
        }
    }
}

pub fn search_results_page(kind: SearchKind, results: &SearchResults) -> Markup {
    let path = kind.path();

    base_layout(
        "Search",
        html! {
            (search_box(&format!("/{}/search", path), "Search again", &results.search_term))

            h2 class="text-xl font-semibold text-gray-900" {
                "Number of search results for \"" (results.search_term) "\": " (results.count)
            }

            ul class="mt-4 space-y-1" {
                @for item in &results.data {
                    li {
                        a href=(format!("/{}/{}", path, item.id)) { (item.name) }
                        span class="text-sm text-gray-500" {
                            " (" (item.num_upcoming_shows) " upcoming)"
                        }
                    }
                }
            }
        },
    )
}

/// Where a venue or artist form posts and how it is titled.
pub struct FormTarget<'a> {
    pub title: &'a str,
    pub action: String,
}

pub fn venue_form_page(
    target: &FormTarget<'_>,
    values: &VenueInput,
    catalog: &[genre::Model],
    notice: Option<&Notice>,
) -> Markup {
    base_layout(
        target.title,
        html! {
            @if let Some(notice) = notice {
                (notice_banner(notice))
            }

            h1 class="text-2xl font-bold text-gray-900 mb-6" { (target.title) }

            form method="post" action=(target.action) class="space-y-4" {
                (text_field("name", "Name", Some(values.name.as_str()).filter(|n| !n.is_empty()), true))
                (text_field("city", "City", values.city.as_deref(), false))
                (text_field("state", "State", values.state.as_deref(), false))
                (text_field("address", "Address", values.address.as_deref(), false))
                (text_field("phone", "Phone", values.phone.as_deref(), false))
                (genre_select(catalog, &values.genres))
                (text_field("image_link", "Image link", values.image_link.as_deref(), false))
                (text_field("website", "Website", values.website.as_deref(), false))
                (text_field("facebook_link", "Facebook link", values.facebook_link.as_deref(), false))
                (checkbox_field("seeking_talent", "Seeking talent", values.seeking_talent))
                (text_field("seeking_description", "Seeking description", values.seeking_description.as_deref(), false))
                button type="submit" class="button" { "Save venue" }
            }
        },
    )
}

pub fn artist_form_page(
    target: &FormTarget<'_>,
    values: &ArtistInput,
    catalog: &[genre::Model],
    notice: Option<&Notice>,
) -> Markup {
    base_layout(
        target.title,
        html! {
            @if let Some(notice) = notice {
                (notice_banner(notice))
            }

            h1 class="text-2xl font-bold text-gray-900 mb-6" { (target.title) }

            form method="post" action=(target.action) class="space-y-4" {
                (text_field("name", "Name", Some(values.name.as_str()).filter(|n| !n.is_empty()), true))
                (text_field("city", "City", values.city.as_deref(), false))
                (text_field("state", "State", values.state.as_deref(), false))
                (text_field("phone", "Phone", values.phone.as_deref(), false))
                (genre_select(catalog, &values.genres))
                (text_field("image_link", "Image link", values.image_link.as_deref(), false))
                (text_field("website", "Website", values.website.as_deref(), false))
                (text_field("facebook_link", "Facebook link", values.facebook_link.as_deref(), false))
                (checkbox_field("seeking_venue", "Seeking venues", values.seeking_venue))
                (text_field("seeking_description", "Seeking description", values.seeking_description.as_deref(), false))
                button type="submit" class="button" { "Save artist" }
            }
        },
    )
}

pub fn show_form_page(notice: Option<&Notice>) -> Markup {
    base_layout(
        "New show",
        html! {
            @if let Some(notice) = notice {
                (notice_banner(notice))
            }

            h1 class="text-2xl font-bold text-gray-900 mb-6" { "List a new show" }

            form method="post" action="/shows/create" class="space-y-4" {
                (text_field("artist_id", "Artist ID", None, true))
                (text_field("venue_id", "Venue ID", None, true))
                div class="form-group" {
                    label for="start_time" class="block text-sm font-medium text-gray-700 mb-2" { "Start time" }
                    input
                        type="text"
                        id="start_time"
                        name="start_time"
                        placeholder="YYYY-MM-DD HH:MM:SS"
                        required
                        class="w-full px-3 py-2 border border-gray-300 rounded-md";
                }
                button type="submit" class="button" { "Create show" }
            }
        },
    )
}

pub fn not_found_page() -> Markup {
    base_layout(
        "Not found",
        html! {
            div class="text-center py-12" {
                h1 class="text-4xl font-bold text-gray-900" { "404" }
                p class="text-gray-600 mt-2" { "Sorry, we couldn't find that page." }
                a href="/" class="mt-4 inline-block" { "Back home" }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> Markup {
    base_layout(
        "Error",
        html! {
            div class="text-center py-12" {
                h1 class="text-4xl font-bold text-gray-900" { (status.as_u16()) }
                p class="text-gray-600 mt-2" { (message) }
                a href="/" class="mt-4 inline-block" { "Back home" }
            }
        },
    )
}
