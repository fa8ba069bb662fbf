//! Query debouncing on the paused tokio clock

use std::time::Duration;

use kodegen_tools_tableview::session::debounce_queries;
use tokio::sync::mpsc;
use tokio::time::sleep;

const DELAY: Duration = Duration::from_millis(150);

fn spawn_debouncer() -> (
    mpsc::Sender<String>,
    mpsc::UnboundedReceiver<String>,
    tokio::task::JoinHandle<()>,
) {
    let (input_tx, input_rx) = mpsc::channel(16);
    let (fired_tx, fired_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(debounce_queries(input_rx, DELAY, move |query| {
        let _ = fired_tx.send(query);
    }));
    (input_tx, fired_rx, task)
}

#[tokio::test(start_paused = true)]
async fn test_burst_fires_once_with_latest_text() {
    let (input, mut fired, task) = spawn_debouncer();

    for text in ["c", "ca", "caf"] {
        input.send(text.to_string()).await.unwrap();
        sleep(Duration::from_millis(50)).await;
    }
    assert!(fired.try_recv().is_err(), "fired inside the quiet period");

    sleep(Duration::from_millis(200)).await;
    assert_eq!(fired.try_recv().unwrap(), "caf");
    assert!(fired.try_recv().is_err());

    drop(input);
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_separate_bursts_fire_separately() {
    let (input, mut fired, task) = spawn_debouncer();

    input.send("tea".to_string()).await.unwrap();
    sleep(Duration::from_millis(300)).await;
    input.send("paris".to_string()).await.unwrap();
    sleep(Duration::from_millis(300)).await;

    assert_eq!(fired.try_recv().unwrap(), "tea");
    assert_eq!(fired.try_recv().unwrap(), "paris");

    drop(input);
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_pending_input_flushes_when_input_closes() {
    let (input, mut fired, task) = spawn_debouncer();

    input.send("late".to_string()).await.unwrap();
    drop(input);
    task.await.unwrap();

    assert_eq!(fired.try_recv().unwrap(), "late");
}

#[tokio::test(start_paused = true)]
async fn test_closing_without_input_fires_nothing() {
    let (input, mut fired, task) = spawn_debouncer();

    drop(input);
    task.await.unwrap();

    assert!(fired.try_recv().is_err());
}
