use crate::{cli::fail, config, info, success};

pub async fn setup() {
    let path = config::data_dir().join(".env");

    match config::write_env_template().await {
        Ok(true) => {
            success!("Created {} with placeholder credentials.", path.display());
        }
        Ok(false) => {
            info!("{} already exists. Skipping creation.", path.display());
        }
        Err(e) => fail(&e),
    }

    info!("Next steps:");
    info!("1. Update {} with your Spotify Developer credentials", path.display());
    info!("2. Run plyzer auth");
    info!("3. Run plyzer analyze <playlist link or ID>");
}
