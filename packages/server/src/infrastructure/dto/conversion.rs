//! ドメインモデルから DTO への変換

use rondan_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::{ChatMessage, KickedUser, Participant, Room, Team};

use super::http::{
    KickedUserDto, MessageDto, ParticipantDto, RoomSnapshotDto, RoomSummaryDto, TeamDto,
};

impl From<&Team> for TeamDto {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            description: team.description.clone(),
            members: team.members.iter().map(|m| m.as_str().to_string()).collect(),
            max_debaters: team.max_debaters,
        }
    }
}

impl From<&Participant> for ParticipantDto {
    fn from(participant: &Participant) -> Self {
        Self {
            user_id: participant.user_id.as_str().to_string(),
            username: participant.username.as_str().to_string(),
            role: participant.role,
            team: participant.team,
            joined_at: timestamp_to_jst_rfc3339(participant.joined_at.value()),
        }
    }
}

impl From<&ChatMessage> for MessageDto {
    fn from(message: &ChatMessage) -> Self {
        Self {
            content: message.content.as_str().to_string(),
            user_id: message.user_id.as_str().to_string(),
            username: message.username.as_str().to_string(),
            kind: message.kind,
            team: message.team,
            timestamp: message.timestamp.value(),
        }
    }
}

impl From<&KickedUser> for KickedUserDto {
    fn from(kicked: &KickedUser) -> Self {
        Self {
            user_id: kicked.user_id.as_str().to_string(),
            username: kicked.username.as_str().to_string(),
            reason: kicked.reason.clone(),
            timestamp: kicked.timestamp.value(),
        }
    }
}

impl From<&Room> for RoomSnapshotDto {
    fn from(room: &Room) -> Self {
        Self {
            room_id: room.id.as_str().to_string(),
            topic: room.topic.clone(),
            description: room.description.clone(),
            category: room.category.clone(),
            format: room.format,
            debate_type: room.debate_type,
            status: room.status,
            created_by: room.created_by.as_str().to_string(),
            is_private: room.is_private,
            max_debaters: room.max_debaters,
            team1: room.team1.as_ref().map(TeamDto::from),
            team2: room.team2.as_ref().map(TeamDto::from),
            participants: room.participants.iter().map(ParticipantDto::from).collect(),
            messages: room.messages.iter().map(MessageDto::from).collect(),
            kicked_users: room.kicked_users.iter().map(KickedUserDto::from).collect(),
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
            updated_at: timestamp_to_jst_rfc3339(room.updated_at.value()),
        }
    }
}

impl From<&Room> for RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            room_id: room.id.as_str().to_string(),
            topic: room.topic.clone(),
            description: room.description.clone(),
            category: room.category.clone(),
            format: room.format,
            status: room.status,
            debate_type: room.debate_type,
            max_debaters: room.max_debaters,
            current_participants: room.participants.len(),
            created_by: room.created_by.as_str().to_string(),
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
        }
    }
}
