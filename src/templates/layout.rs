use maud::{html, Markup, DOCTYPE};

pub fn base_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" class="h-full" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " - Fyyur" }

                link rel="stylesheet" href="/static/css/main.css";

                // HTMX drives the delete buttons
                script src="https://unpkg.com/htmx.org@1.9.10" {}
            }
            body class="h-full bg-gray-50" {
                div class="min-h-full" {
                    (nav_bar())

                    main class="container mx-auto px-4 py-8" {
                        (content)
                    }

                    (footer())
                }
            }
        }
    }
}

fn nav_bar() -> Markup {
    html! {
        nav class="bg-white shadow-sm" {
            div class="container mx-auto px-4" {
                div class="flex justify-between items-center h-16" {
                    a href="/" class="flex items-center space-x-3" {
                        span class="text-xl font-bold text-gray-900" { "🔥 Fyyur" }
                    }

                    div class="flex space-x-4" {
                        a href="/venues" class="nav-link" { "Venues" }
                        a href="/artists" class="nav-link" { "Artists" }
                        a href="/shows" class="nav-link" { "Shows" }
                    }
                }
            }
        }
    }
}

fn footer() -> Markup {
    html! {
        footer class="bg-white border-t border-gray-200 mt-12" {
            div class="container mx-auto px-4 py-6" {
                div class="text-center text-gray-600 text-sm" {
                    "Fyyur - find venues, artists and shows near you"
                }
            }
        }
    }
}
