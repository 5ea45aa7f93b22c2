/// News outlets whose URLs are treated as trusted, including every subdomain.
pub const TRUSTED_DOMAINS: &[&str] = &[
    // Malayalam outlets
    "manoramaonline.com",
    "mathrubhumi.com",
    "madhyamam.com",
    "deshabhimani.com",
    "keralakaumudi.com",
    "deepika.com",
    "janmabhumidaily.com",
    "mangalam.com",
    "metrovaartha.com",
    "chandrikadaily.com",
    "sirajlive.com",
    "suprabhaatham.com",
    "thejasnews.com",
    "asianetnews.com",
    "twentyfournews.com",
    "reporterlive.com",
    "jaihindtv.in",
    "mediaonetvnews.in",
    "kvartha.com",
    // English outlets
    "thehindu.com",
    "timesofindia.com",
    "indianexpress.com",
    "hindustantimes.com",
    "deccanchronicle.com",
    "ndtv.com",
    "firstpost.com",
    "economictimes.indiatimes.com",
    "livemint.com",
    "telegraphindia.com",
    "scroll.in",
    "news18.com",
    "business-standard.com",
    "newindianexpress.com",
];

pub const URL_SHORTENERS: &[&str] = &[
    "bit.ly",
    "goo.gl",
    "tinyurl.com",
    "t.co",
    "ow.ly",
    "is.gd",
    "buff.ly",
    "cutt.ly",
];

/// True when `host` is `domain` itself or one of its subdomains.
pub fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

pub fn is_trusted_host(host: &str) -> bool {
    TRUSTED_DOMAINS.iter().any(|domain| host_matches(host, domain))
}

pub fn is_shortener(host: &str) -> bool {
    URL_SHORTENERS.iter().any(|domain| host_matches(host, domain))
}
