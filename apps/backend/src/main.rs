#[tokio::main]
async fn main() -> anyhow::Result<()> {
    kanji_flashcards_backend::run().await
}
