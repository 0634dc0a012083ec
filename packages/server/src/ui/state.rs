//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, JoinParticipantUseCase,
    NotifyTypingUseCase, ReportErrorUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// JoinParticipantUseCase（参加のユースケース）
    pub join_participant_usecase: Arc<JoinParticipantUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// NotifyTypingUseCase（typing 通知のユースケース）
    pub notify_typing_usecase: Arc<NotifyTypingUseCase>,
    /// DisconnectParticipantUseCase（切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// ReportErrorUseCase（エラー通知のユースケース）
    pub report_error_usecase: Arc<ReportErrorUseCase>,
}
