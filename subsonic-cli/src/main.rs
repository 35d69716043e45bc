use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{TimeDelta, Utc};
use clap::{Parser, Subcommand};
use subsonic_api::objects::Child;
use subsonic_api::requests::{
    AlbumListType, CreateShare, GetAlbumList, GetLyrics, GetRandomSongs, Search, StarTargets,
};
use subsonic_api::{MAX_RATING, ServerConfig, SubsonicClient, SubsonicError, SubsonicId, UnixMillis};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "subsonic",
    version,
    about = "Command-line client for Subsonic-compatible music servers"
)]
struct Cli {
    /// Log requests (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Save server URL and credentials
    Login {
        /// Server URL, e.g. `music.example.com` or `http://localhost:4533`
        #[arg(required_unless_present = "check")]
        url: Option<String>,
        #[arg(required_unless_present = "check")]
        username: Option<String>,
        #[arg(required_unless_present = "check")]
        password: Option<String>,
        /// Send the password itself instead of a salted token
        #[arg(long)]
        plain: bool,
        /// Accept invalid TLS certificates
        #[arg(long)]
        insecure: bool,
        /// Check the saved login instead
        #[arg(long)]
        check: bool,
    },
    /// Forget the saved server
    Logout,
    /// Check connectivity and show server info
    Ping,
    /// List OpenSubsonic extensions
    Extensions,
    /// List all artists
    Artists,
    /// Show an artist and its albums
    Artist {
        id: String,
    },
    /// Show an album and its songs
    Album {
        id: String,
    },
    /// Search artists, albums and songs
    Search {
        query: String,
        /// Max results per kind
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },
    /// List albums
    Albums {
        /// newest, random, highest, frequent, recent, starred,
        /// alphabeticalByName, alphabeticalByArtist, byYear, byGenre
        #[arg(short = 't', long = "type", default_value = "newest")]
        list_type: AlbumListType,
        #[arg(short = 'n', long, default_value = "20")]
        size: u32,
        /// Genre for `byGenre`
        #[arg(long)]
        genre: Option<String>,
        /// First year for `byYear`
        #[arg(long)]
        from_year: Option<i32>,
        /// Last year for `byYear`
        #[arg(long)]
        to_year: Option<i32>,
    },
    /// Random songs
    Random {
        #[arg(short = 'n', long, default_value = "10")]
        size: u32,
        #[arg(long)]
        genre: Option<String>,
    },
    /// List playlists
    Playlists,
    /// Show a playlist and its songs
    Playlist {
        id: String,
    },
    /// Star songs, or albums/artists with --album/--artist
    Star {
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long, conflicts_with = "artist")]
        album: bool,
        #[arg(long)]
        artist: bool,
    },
    /// Remove stars
    Unstar {
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long, conflicts_with = "artist")]
        album: bool,
        #[arg(long)]
        artist: bool,
    },
    /// Rate a song, album or artist (0 removes the rating)
    Rate {
        id: String,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_RATING)))]
        rating: u8,
    },
    /// Create a public share link
    Share {
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Expire after this many days
        #[arg(short, long)]
        expires: Option<i64>,
    },
    /// List shares
    Shares,
    /// Download the original file of a song
    Download {
        id: String,
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the lyrics of a song
    Lyrics {
        /// Song ID
        id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Login {
            url,
            username,
            password,
            plain,
            insecure,
            check,
        } => cmd_login(url, username, password, plain, insecure, check),
        Command::Logout => cmd_logout(),
        Command::Ping => cmd_ping(),
        Command::Extensions => cmd_extensions(),
        Command::Artists => cmd_artists(),
        Command::Artist { id } => cmd_artist(&id),
        Command::Album { id } => cmd_album(&id),
        Command::Search { query, limit } => cmd_search(&query, limit),
        Command::Albums {
            list_type,
            size,
            genre,
            from_year,
            to_year,
        } => {
            let req = GetAlbumList {
                size: Some(size),
                genre,
                from_year,
                to_year,
                ..GetAlbumList::new(list_type)
            };
            cmd_albums(&req)
        }
        Command::Random { size, genre } => cmd_random(size, genre),
        Command::Playlists => cmd_playlists(),
        Command::Playlist { id } => cmd_playlist(&id),
        Command::Star { ids, album, artist } => cmd_star(true, ids, album, artist),
        Command::Unstar { ids, album, artist } => cmd_star(false, ids, album, artist),
        Command::Rate { id, rating } => cmd_rate(&id, rating),
        Command::Share {
            ids,
            description,
            expires,
        } => cmd_share(ids, description, expires),
        Command::Shares => cmd_shares(),
        Command::Download { id, output } => cmd_download(&id, output),
        Command::Lyrics { id } => cmd_lyrics(&id),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn client() -> Result<SubsonicClient> {
    SubsonicClient::from_saved().context("no usable server login; run `subsonic login` first")
}

fn fmt_duration(secs: i32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// `mm:ss.xx`, as in LRC files.
fn fmt_lrc_time(ms: i64) -> String {
    let ms = ms.max(0);
    format!("{:02}:{:02}.{:02}", ms / 60_000, (ms / 1000) % 60, (ms % 1000) / 10)
}

fn print_song(song: &Child) {
    let track = if song.track > 0 {
        format!("{:>2}. ", song.track)
    } else {
        String::new()
    };
    println!(
        "  [{}] {track}{} - {} ({})",
        song.id,
        song.artist,
        song.title,
        fmt_duration(song.duration)
    );
}

// ── login / logout / ping ──

fn cmd_login(
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    plain: bool,
    insecure: bool,
    check: bool,
) -> Result<()> {
    if check {
        let Some(config) = ServerConfig::load()? else {
            println!("Not logged in.");
            return Ok(());
        };
        let user = config.username.clone();
        let mut client = SubsonicClient::new(config)?;
        match client.ping() {
            Ok(()) => println!("Logged in as: {user} ({})", client.config().url),
            Err(e) => println!("Login saved but check failed: {e}"),
        }
        return Ok(());
    }

    let url = url.context("server URL required")?;
    let username = username.context("username required")?;
    let password = password.context("password required")?;
    let mut config = ServerConfig::new(url, username, password);
    config.use_salt_auth = !plain;
    config.verify_cert = !insecure;

    // Refuse to save credentials the server rejects.
    SubsonicClient::new(config.clone())?
        .ping()
        .context("server rejected the login")?;
    config.save()?;
    debug!(path = %ServerConfig::path()?.display(), "saved server config");
    println!("Login saved.");
    Ok(())
}

fn cmd_logout() -> Result<()> {
    ServerConfig::clear()?;
    println!("Login cleared.");
    Ok(())
}

fn cmd_ping() -> Result<()> {
    let mut client = client()?;
    client.ping()?;
    let session = client.session();
    println!("Server:   {}", client.config().url);
    println!("Protocol: {}", session.version);
    if let Some(kind) = &session.server_type {
        let version = session.server_version.as_deref().unwrap_or("?");
        println!("Software: {kind} {version}");
    }
    println!("OpenSubsonic: {}", if session.open_subsonic { "yes" } else { "no" });
    Ok(())
}

fn cmd_extensions() -> Result<()> {
    let mut client = client()?;
    client.ping()?;
    match client.get_open_subsonic_extensions() {
        Ok(extensions) => {
            for ext in extensions {
                let versions: Vec<String> = ext.versions.iter().map(ToString::to_string).collect();
                println!("  {} (v{})", ext.name, versions.join(", v"));
            }
        }
        Err(SubsonicError::OpenSubsonicUnsupported) => {
            println!("Server does not support OpenSubsonic.");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

// ── browsing ──

fn cmd_artists() -> Result<()> {
    let mut client = client()?;
    let artists = client.get_artists(None)?;
    for index in &artists.index {
        println!("{}", index.name);
        for a in &index.artist {
            println!("  [{}] {} ({} albums)", a.id, a.name, a.album_count);
        }
    }
    Ok(())
}

fn cmd_artist(id: &str) -> Result<()> {
    let mut client = client()?;
    let artist = client.get_artist(&SubsonicId::from(id))?;
    println!("Artist: {} (id={})", artist.artist.name, artist.artist.id);
    println!();
    for a in &artist.album {
        println!("  [{}] {} ({}, {} songs)", a.id, a.name, a.year, a.song_count);
    }
    Ok(())
}

fn cmd_album(id: &str) -> Result<()> {
    let mut client = client()?;
    let album = client.get_album(&SubsonicId::from(id))?;
    let a = &album.album;
    println!("Album:    {} (id={})", a.name, a.id);
    println!("Artist:   {} (id={})", a.artist, a.artist_id);
    if a.year > 0 {
        println!("Year:     {}", a.year);
    }
    if !a.genre.is_empty() {
        println!("Genre:    {}", a.genre);
    }
    println!("Duration: {}", fmt_duration(a.duration));
    println!();
    for song in &album.song {
        print_song(song);
    }
    Ok(())
}

fn cmd_search(query: &str, limit: u32) -> Result<()> {
    let mut client = client()?;
    let req = Search {
        artist_count: Some(limit),
        album_count: Some(limit),
        song_count: Some(limit),
        ..Search::new(query)
    };
    let result = client.search3(&req)?;

    if !result.artist.is_empty() {
        println!("Artists:");
        for a in &result.artist {
            println!("  [{}] {}", a.id, a.name);
        }
    }
    if !result.album.is_empty() {
        println!("Albums:");
        for a in &result.album {
            println!("  [{}] {} - {}", a.id, a.artist, a.name);
        }
    }
    if !result.song.is_empty() {
        println!("Songs:");
        for s in &result.song {
            print_song(s);
        }
    }
    Ok(())
}

fn cmd_albums(req: &GetAlbumList) -> Result<()> {
    let mut client = client()?;
    if matches!(req.list_type, AlbumListType::ByYear | AlbumListType::ByGenre) {
        client.ping()?;
        if !client.session().can_filter_album_list_by_year_and_genre() {
            bail!("server protocol {} cannot list albums by year or genre", client.session().version);
        }
    }
    for a in client.get_album_list2(req)? {
        println!("  [{}] {} - {} ({})", a.id, a.artist, a.name, a.year);
    }
    Ok(())
}

fn cmd_random(size: u32, genre: Option<String>) -> Result<()> {
    let mut client = client()?;
    let req = GetRandomSongs {
        size: Some(size),
        genre,
        ..GetRandomSongs::default()
    };
    for song in client.get_random_songs(&req)? {
        print_song(&song);
    }
    Ok(())
}

// ── playlists ──

fn cmd_playlists() -> Result<()> {
    let mut client = client()?;
    for p in client.get_playlists(None)? {
        println!(
            "  [{}] {} ({} songs, {}) by {}",
            p.id, p.name, p.song_count, p.duration, p.owner
        );
    }
    Ok(())
}

fn cmd_playlist(id: &str) -> Result<()> {
    let mut client = client()?;
    let p = client.get_playlist(&SubsonicId::from(id))?;
    println!("Playlist: {} (id={})", p.playlist.name, p.playlist.id);
    println!("Owner:    {}", p.playlist.owner);
    println!("Songs:    {}", p.playlist.song_count);
    if !p.playlist.comment.is_empty() {
        println!("Comment:  {}", p.playlist.comment);
    }
    println!();
    for song in &p.entry {
        print_song(song);
    }
    Ok(())
}

// ── annotation ──

fn cmd_star(star: bool, ids: Vec<String>, album: bool, artist: bool) -> Result<()> {
    let ids: Vec<SubsonicId> = ids.into_iter().map(SubsonicId::from).collect();
    let count = ids.len();
    let mut targets = StarTargets::default();
    if album {
        targets.album_ids = ids;
    } else if artist {
        targets.artist_ids = ids;
    } else {
        targets.ids = ids;
    }

    let mut client = client()?;
    if star {
        client.star(&targets)?;
        println!("Starred {count} item(s).");
    } else {
        client.unstar(&targets)?;
        println!("Unstarred {count} item(s).");
    }
    Ok(())
}

fn cmd_rate(id: &str, rating: u8) -> Result<()> {
    let mut client = client()?;
    client.set_rating(&SubsonicId::from(id), rating)?;
    println!("Rated {id}: {rating}");
    Ok(())
}

// ── sharing ──

fn cmd_share(ids: Vec<String>, description: Option<String>, expires: Option<i64>) -> Result<()> {
    let expires = expires
        .map(|days| {
            TimeDelta::try_days(days)
                .and_then(|d| Utc::now().checked_add_signed(d))
                .map(UnixMillis::from)
                .context("expiry out of range")
        })
        .transpose()?;
    let req = CreateShare {
        ids: ids.into_iter().map(SubsonicId::from).collect(),
        description: description.unwrap_or_default(),
        expires,
    };

    let mut client = client()?;
    let share = client.create_share(&req)?;
    println!("Share:   {} (id={})", share.url, share.id);
    if let Some(expires) = share.expires {
        println!("Expires: {}", expires.format("%Y-%m-%d %H:%M UTC"));
    }
    Ok(())
}

fn cmd_shares() -> Result<()> {
    let mut client = client()?;
    for s in client.get_shares()? {
        let desc = if s.description.is_empty() {
            String::new()
        } else {
            format!(" {}", s.description)
        };
        println!(
            "  [{}] {}{desc} ({} entries, {} visits)",
            s.id,
            s.url,
            s.entry.len(),
            s.visit_count
        );
    }
    Ok(())
}

// ── download / lyrics ──

fn cmd_download(id: &str, output: Option<PathBuf>) -> Result<()> {
    let mut client = client()?;
    let id = SubsonicId::from(id);

    let dest = if let Some(p) = output {
        p
    } else {
        let song = client.get_song(&id)?;
        let ext = if song.suffix.is_empty() {
            "bin"
        } else {
            song.suffix.as_str()
        };
        let name = format!("{} - {}.{ext}", song.artist, song.title).replace(['/', '\\'], "_");
        PathBuf::from(name)
    };

    let mut resp = client.download(&id)?;
    let file = File::create(&dest).with_context(|| format!("cannot create {}", dest.display()))?;
    let mut writer = BufWriter::new(file);
    let size = io::copy(&mut resp, &mut writer).context("download interrupted")?;
    writer.flush()?;
    println!("Downloaded {} ({size} bytes)", dest.display());
    Ok(())
}

fn cmd_lyrics(id: &str) -> Result<()> {
    let mut client = client()?;
    let id = SubsonicId::from(id);
    client.ping()?;

    if client.session().open_subsonic {
        let lyrics = client.get_lyrics_by_song_id(&id)?;
        if let Some(l) = lyrics.iter().find(|l| l.synced).or_else(|| lyrics.first()) {
            for line in &l.line {
                match line.start {
                    Some(start) => println!("[{}] {}", fmt_lrc_time(start + l.offset), line.value),
                    None => println!("{}", line.value),
                }
            }
            return Ok(());
        }
    }

    // Plain lookup by artist and title.
    let song = client.get_song(&id)?;
    let req = GetLyrics {
        artist: Some(song.artist),
        title: Some(song.title),
    };
    let lyrics = client.get_lyrics(&req)?;
    if lyrics.value.is_empty() {
        println!("No lyrics available.");
    } else {
        println!("{}", lyrics.value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_album_list_type() {
        let cli = Cli::try_parse_from(["subsonic", "albums", "-t", "alphabeticalbyname"]).unwrap();
        let Command::Albums { list_type, size, .. } = cli.command else {
            panic!("expected albums");
        };
        assert_eq!(list_type, AlbumListType::AlphabeticalByName);
        assert_eq!(size, 20);
    }

    #[test]
    fn rating_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["subsonic", "rate", "t1", "6"]).is_err());
        assert!(Cli::try_parse_from(["subsonic", "rate", "t1", "0"]).is_ok());
    }

    #[test]
    fn time_formats() {
        assert_eq!(fmt_duration(562), "9:22");
        assert_eq!(fmt_lrc_time(83_456), "01:23.45");
        assert_eq!(fmt_lrc_time(-20), "00:00.00");
    }
}
