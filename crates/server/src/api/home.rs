pub async fn home() -> &'static str {
    "Jeepney Passenger Prediction API is running!"
}
