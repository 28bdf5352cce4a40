use super::model::Track;

fn seed(
    id: &str,
    title: &str,
    artist: &str,
    album: &str,
    year: i32,
    duration_sec: u32,
) -> Track {
    Track {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        album: album.to_string(),
        year: Some(year),
        duration_sec: Some(duration_sec),
    }
}

/// The fixed collection used on first run and by reset.
pub fn seed_tracks() -> Vec<Track> {
    vec![
        seed("1", "Everlong", "Foo Fighters", "The Colour and the Shape", 1997, 250),
        seed("2", "Yellow", "Coldplay", "Parachutes", 2000, 269),
        seed("3", "Fix You", "Coldplay", "X&Y", 2005, 294),
        seed("4", "Hysteria", "Muse", "Absolution", 2003, 227),
        seed("5", "Starlight", "Muse", "Black Holes and Revelations", 2006, 240),
        seed("6", "Blackbird", "Alter Bridge", "Blackbird", 2007, 448),
        seed(
            "7",
            "The Pretender",
            "Foo Fighters",
            "Echoes, Silence, Patience & Grace",
            2007,
            269,
        ),
        seed("8", "Times Like These", "Foo Fighters", "One by One", 2002, 255),
        seed("9", "In The End", "Linkin Park", "Hybrid Theory", 2000, 216),
        seed("10", "Numb", "Linkin Park", "Meteora", 2003, 187),
    ]
}
