use reelgate_model::Provider;

/// Built-in providers seeded on first run, in display order.
pub fn default_providers() -> Vec<Provider> {
    vec![
        Provider {
            name: "Vidsrc.vip".to_string(),
            logo: Some("https://vidsrc.vip/static/logo.png".to_string()),
            url: "https://vidsrc.vip/embed/movie/{id}".to_string(),
            tv_url: "https://vidsrc.vip/embed/tv/{id}/{season}/{episode}"
                .to_string(),
        },
        Provider {
            name: "2Embed.cc".to_string(),
            logo: Some("https://www.2embed.cc/images/logo.png".to_string()),
            url: "https://www.2embed.cc/embed/{id}".to_string(),
            tv_url: "https://www.2embed.cc/embedtv/{id}&s={season}&e={episode}"
                .to_string(),
        },
    ]
}
